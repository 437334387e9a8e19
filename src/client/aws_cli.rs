//! SiteWise client backed by the AWS command line
//!
//! Credential resolution, request signing and retries on transport errors are
//! left to the `aws` executable. Each call runs one `aws iotsitewise`
//! operation with `--no-paginate --output json` and decodes the response.

use super::SiteWiseApi;
use crate::error::{Result, SiteWiseError};
use crate::types::{
    AssetDescription, AssetModelDescription, AssetModelSummary, AssetSummary, Page,
};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::process::{Command, Stdio};

const SERVICE: &str = "iotsitewise";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListAssetModelsResponse {
    #[serde(default)]
    asset_model_summaries: Vec<AssetModelSummary>,
    next_token: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListAssetsResponse {
    #[serde(default)]
    asset_summaries: Vec<AssetSummary>,
    next_token: Option<String>,
}

impl From<ListAssetsResponse> for Page<AssetSummary> {
    fn from(response: ListAssetsResponse) -> Self {
        Page {
            items: response.asset_summaries,
            next_token: response.next_token,
        }
    }
}

/// Client invoking `aws iotsitewise ...` subprocesses
#[derive(Debug, Clone)]
pub struct AwsCliClient {
    command: String,
    profile: Option<String>,
    region: Option<String>,
}

impl AwsCliClient {
    /// Create a client running the given `aws` executable
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            profile: None,
            region: None,
        }
    }

    pub fn with_profile(mut self, profile: Option<String>) -> Self {
        self.profile = profile;
        self
    }

    pub fn with_region(mut self, region: Option<String>) -> Self {
        self.region = region;
        self
    }

    /// Full argument list for one operation
    fn arguments(
        &self,
        operation: &str,
        params: &[(&str, Option<&str>)],
        flags: &[&str],
    ) -> Vec<String> {
        let mut args = vec![SERVICE.to_string(), operation.to_string()];
        for (name, value) in params {
            if let Some(value) = value {
                args.push(format!("--{}", name));
                args.push((*value).to_string());
            }
        }
        args.extend(flags.iter().map(|f| format!("--{}", f)));
        args.push("--no-paginate".to_string());
        args.push("--output".to_string());
        args.push("json".to_string());
        if let Some(ref profile) = self.profile {
            args.push("--profile".to_string());
            args.push(profile.clone());
        }
        if let Some(ref region) = self.region {
            args.push("--region".to_string());
            args.push(region.clone());
        }
        args
    }

    fn invoke<T: DeserializeOwned>(
        &self,
        operation: &str,
        params: &[(&str, Option<&str>)],
        flags: &[&str],
    ) -> Result<T> {
        let args = self.arguments(operation, params, flags);
        log::debug!("Running {} {}", self.command, args.join(" "));

        let output = Command::new(&self.command)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| {
                SiteWiseError::api(operation, format!("failed to run '{}': {}", self.command, e))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SiteWiseError::api(
                operation,
                format!("{} ({})", stderr.trim(), output.status),
            ));
        }

        serde_json::from_slice(&output.stdout).map_err(|e| {
            SiteWiseError::ParseError(format!("Unexpected {} response: {}", operation, e))
        })
    }
}

impl Default for AwsCliClient {
    fn default() -> Self {
        Self::new("aws")
    }
}

impl SiteWiseApi for AwsCliClient {
    fn describe_asset(&self, asset_id: &str) -> Result<AssetDescription> {
        self.invoke(
            "describe-asset",
            &[("asset-id", Some(asset_id))],
            &["exclude-properties"],
        )
    }

    fn list_associated_assets(
        &self,
        asset_id: &str,
        hierarchy_id: &str,
        next_token: Option<&str>,
    ) -> Result<Page<AssetSummary>> {
        let response: ListAssetsResponse = self.invoke(
            "list-associated-assets",
            &[
                ("asset-id", Some(asset_id)),
                ("hierarchy-id", Some(hierarchy_id)),
                ("next-token", next_token),
            ],
            &[],
        )?;
        Ok(response.into())
    }

    fn describe_asset_model(
        &self,
        model_id: &str,
        exclude_properties: bool,
    ) -> Result<AssetModelDescription> {
        let flags: &[&str] = if exclude_properties {
            &["exclude-properties"]
        } else {
            &[]
        };
        self.invoke(
            "describe-asset-model",
            &[("asset-model-id", Some(model_id))],
            flags,
        )
    }

    fn list_asset_models(&self, next_token: Option<&str>) -> Result<Page<AssetModelSummary>> {
        let response: ListAssetModelsResponse =
            self.invoke("list-asset-models", &[("next-token", next_token)], &[])?;
        Ok(Page {
            items: response.asset_model_summaries,
            next_token: response.next_token,
        })
    }

    fn list_assets(&self, model_id: &str, next_token: Option<&str>) -> Result<Page<AssetSummary>> {
        let response: ListAssetsResponse = self.invoke(
            "list-assets",
            &[
                ("asset-model-id", Some(model_id)),
                ("next-token", next_token),
            ],
            &[],
        )?;
        Ok(response.into())
    }
}
