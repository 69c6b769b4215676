//! Command dispatch

use std::io::{BufRead, Write};

use agent::{BackgroundCheckManager, CheckReport, OpenAiChatModel};
use kernel::error::app_error::{AppError, AppResult};
use kernel::validation::{BusinessName, SearchQuery};
use records::PublicRecordsClient;
use search::WebSearchTool;

use crate::cli::{Cli, Command, RecordsCommand};
use crate::config::AppConfig;
use crate::output;

pub struct VendorCheckApp {
    config: AppConfig,
}

impl VendorCheckApp {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub async fn run(&self, cli: Cli) -> AppResult<()> {
        match cli.command {
            Some(Command::Search { query, count }) => {
                let tool = WebSearchTool::from_config(&self.config.search_config())?;
                let response = tool.search_web(&query, count).await?;
                output::emit(&response, cli.output.as_deref())
            }
            Some(Command::Records { command }) => {
                let client = PublicRecordsClient::from_config(&self.config.records_config())?;
                let path = cli.output.as_deref();
                match command {
                    RecordsCommand::Registration { name, state } => {
                        let record = client.business_registration(&name, state.as_deref()).await?;
                        output::emit(&record, path)
                    }
                    RecordsCommand::Legal {
                        name,
                        jurisdiction,
                        years_back,
                    } => {
                        let report = client
                            .legal_actions(&name, jurisdiction.as_deref(), years_back)
                            .await?;
                        output::emit(&report, path)
                    }
                    RecordsCommand::Licenses {
                        name,
                        license_types,
                    } => {
                        let report = client.licenses_and_permits(&name, &license_types).await?;
                        output::emit(&report, path)
                    }
                }
            }
            None => {
                let vendor = match cli.vendor {
                    Some(vendor) => vendor,
                    None => prompt_vendor()?,
                };
                let name = BusinessName::parse(&vendor).map_err(|e| {
                    AppError::from(e).with_action("Please provide a valid business name")
                })?;

                let report = self.run_background_check(&name).await;
                output::emit(&report, cli.output.as_deref())
            }
        }
    }

    /// Run one check; every failure is folded into an error report
    pub async fn run_background_check(&self, name: &BusinessName) -> CheckReport {
        tracing::info!(vendor = %name, "Starting background check");

        match self.try_background_check(name).await {
            Ok(report) => {
                tracing::info!(vendor = %name, "Background check completed");
                report
            }
            Err(err) => {
                tracing::error!(vendor = %name, error = %err, "Background check failed");
                CheckReport::failed(name.as_str(), self.describe(&err))
            }
        }
    }

    async fn try_background_check(&self, name: &BusinessName) -> AppResult<CheckReport> {
        let query = SearchQuery::parse(format!("{name} company profile"))?;
        tracing::debug!(query = %query, "Prepared search query");

        let model = OpenAiChatModel::from_config(&self.config.agent_config())?;
        let mut manager = BackgroundCheckManager::new(model);
        Ok(manager.process_request(name.as_str()).await?)
    }

    fn describe(&self, err: &AppError) -> String {
        if !self.config.debug {
            return err.message().to_string();
        }
        match err.action() {
            Some(action) => format!("[{}] {} (Action: {action})", err.kind().as_str(), err.message()),
            None => format!("[{}] {}", err.kind().as_str(), err.message()),
        }
    }
}

fn prompt_vendor() -> AppResult<String> {
    print!("Enter vendor name to check: ");
    std::io::stdout()
        .flush()
        .map_err(|e| AppError::internal("Failed to write prompt").with_source(e))?;

    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .map_err(|e| AppError::internal("Failed to read vendor name").with_source(e))?;
    Ok(line.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use agent::CheckStatus;
    use kernel::error::kind::ErrorKind;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config(base_url: Option<String>, api_key: Option<&str>, debug: bool) -> AppConfig {
        let mut config = AppConfig::from_lookup(|_| None).unwrap();
        config.openai_base_url = base_url;
        config.openai_api_key = api_key.map(String::from);
        config.debug = debug;
        config
    }

    #[tokio::test]
    async fn test_background_check_completed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [{"message": {"role": "assistant", "content": "No red flags."}}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let app = VendorCheckApp::new(config(Some(server.uri()), Some("sk-test"), false));
        let name = BusinessName::parse("Acme Corp").unwrap();
        let report = app.run_background_check(&name).await;

        assert_eq!(report.status, CheckStatus::Completed);
        assert_eq!(report.report.as_deref(), Some("No red flags."));
    }

    #[tokio::test]
    async fn test_missing_key_becomes_error_report() {
        let app = VendorCheckApp::new(config(None, None, false));
        let name = BusinessName::parse("Acme Corp").unwrap();
        let report = app.run_background_check(&name).await;

        assert_eq!(report.vendor, "Acme Corp");
        assert_eq!(report.status, CheckStatus::Error);
        assert!(report.report.is_none());
        assert!(report.error.is_some());
    }

    #[tokio::test]
    async fn test_debug_report_includes_kind_and_action() {
        let app = VendorCheckApp::new(config(None, None, true));
        let name = BusinessName::parse("Acme Corp").unwrap();
        let report = app.run_background_check(&name).await;

        let error = report.error.unwrap();
        assert!(error.starts_with(&format!("[{}]", ErrorKind::Configuration.as_str())));
        assert!(error.contains("OPENAI_API_KEY"));
    }

    #[tokio::test]
    async fn test_upstream_failure_becomes_error_report() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
            .mount(&server)
            .await;

        let app = VendorCheckApp::new(config(Some(server.uri()), Some("sk-test"), false));
        let name = BusinessName::parse("Acme").unwrap();
        let report = app.run_background_check(&name).await;
        assert_eq!(report.status, CheckStatus::Error);
    }

    #[tokio::test]
    async fn test_invalid_vendor_is_validation_error() {
        let app = VendorCheckApp::new(config(None, None, false));
        let cli = Cli {
            vendor: Some("Acme; Corp".into()),
            output: None,
            log_file: None,
            verbose: false,
            command: None,
        };
        let err = app.run(cli).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(err.action(), Some("Please provide a valid business name"));

        // main prints only this, so the hint must travel inside the error
        let printed = err.to_string();
        assert_eq!(printed.matches("valid business name").count(), 1);
    }
}
