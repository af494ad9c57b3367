//! One-off project lookups printed to stdout.

use std::num::NonZeroUsize;
use std::time::Duration;

use anyhow::Result;
use clap::Args;

use super::CliConfig;
use crate::catalog::CerebroClient;
use crate::config::Config;
use crate::core::RequestContext;
use crate::service::ProjectService;
use crate::validation::ProjectPermalink;

/// Print the details of a project.
#[derive(Args, Debug)]
pub struct DetailsCommand {
    /// Project permalink
    pub permalink: String,
}

impl DetailsCommand {
    pub async fn execute(self, cli: &CliConfig) -> Result<()> {
        let permalink = ProjectPermalink::parse(self.permalink)?;
        let config = cli.load_settings().await?;

        let service = ProjectService::new(CerebroClient::new(&config)?);
        let details = service.project_details(&request_context(&config), &permalink).await?;
        print!("{}", details.text);
        Ok(())
    }
}

/// Print the resolved dependencies of a project.
#[derive(Args, Debug)]
pub struct DependenciesCommand {
    /// Project permalink
    pub permalink: String,

    /// Maximum concurrent dependency lookups (0 for unbounded)
    #[arg(long, value_name = "N")]
    pub max_concurrency: Option<usize>,

    /// Overall deadline in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,
}

impl DependenciesCommand {
    pub async fn execute(self, cli: &CliConfig) -> Result<()> {
        let permalink = ProjectPermalink::parse(self.permalink)?;
        let mut config = cli.load_settings().await?;
        if let Some(max) = self.max_concurrency {
            config.max_concurrency = NonZeroUsize::new(max);
        }
        if let Some(secs) = self.timeout {
            config.request_timeout = Some(Duration::from_secs(secs));
        }

        let service = ProjectService::new(CerebroClient::new(&config)?)
            .with_max_concurrency(config.max_concurrency);
        let deps = service.project_dependencies(&request_context(&config), &permalink).await?;
        print!("{}", deps.text);
        Ok(())
    }
}

fn request_context(config: &Config) -> RequestContext {
    let ctx = RequestContext::background();
    match config.request_timeout {
        Some(timeout) => ctx.with_timeout(timeout),
        None => ctx,
    }
}
