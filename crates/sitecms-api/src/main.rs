//! `sitecms` - serve a site with its admin backend, or render a running site.
//!
//! ```text
//! sitecms serve  [--config FILE] [--port PORT] [--bind IP] [--admin-path ROUTE]
//!                [--public-root DIR] [--deployed-root DIR]
//! sitecms render [--url BASE] [--static-files] [--lang LANG]
//! ```
//!
//! Every `serve` option can also be given through its `SITECMS_*` environment
//! variable; command-line values win.

use {
    anyhow::Context,
    clap::{Args, Parser, Subcommand},
    sitecms_api::run_api_server_with_config,
    sitecms_common::CmsConfig,
    sitecms_render::{Document, Endpoint, HttpSource, RenderOutcome, Renderer, RendererConfig},
    std::{
        net::{IpAddr, SocketAddr},
        path::PathBuf,
        sync::Arc,
    },
    tracing_subscriber::EnvFilter,
};

#[derive(Debug, Parser)]
#[command(name = "sitecms", about = "Minimal site CMS: document API, admin UI and page renderer", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Serve the site, the admin UI and the document API
    Serve(ServeArgs),
    /// Render the page of a running site to stdout
    Render(RenderArgs),
}

#[derive(Debug, Args)]
struct ServeArgs {
    /// JSON configuration file; defaults apply to anything it leaves out
    #[arg(long, env = "SITECMS_CONFIG")]
    config: Option<PathBuf>,

    #[arg(long, env = "SITECMS_PORT")]
    port: Option<u16>,

    /// IP address to listen on
    #[arg(long, env = "SITECMS_BIND")]
    bind: Option<IpAddr>,

    /// Route of the admin UI entry page
    #[arg(long, env = "SITECMS_ADMIN_PATH")]
    admin_path: Option<String>,

    /// Source-of-truth document root, also served as the site
    #[arg(long, env = "SITECMS_PUBLIC_ROOT")]
    public_root: Option<PathBuf>,

    /// Directory every save is mirrored into
    #[arg(long, env = "SITECMS_DEPLOYED_ROOT")]
    deployed_root: Option<PathBuf>,
}

impl ServeArgs {
    fn into_config(self) -> anyhow::Result<CmsConfig> {
        let mut config = match &self.config {
            Some(path) => CmsConfig::from_file(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?,
            None => CmsConfig::default(),
        };

        let bind_addr = config.server.bind_addr;
        config.server.bind_addr = SocketAddr::new(
            self.bind.unwrap_or(bind_addr.ip()),
            self.port.unwrap_or(bind_addr.port()),
        );
        if let Some(admin_path) = self.admin_path {
            config.server.admin_path = admin_path;
        }
        if let Some(root) = self.public_root {
            config.store.primary_root = root;
        }
        if let Some(root) = self.deployed_root {
            config.store.deployed_root = root;
        }

        config.validate().context("Invalid configuration")?;
        Ok(config)
    }
}

#[derive(Debug, Args)]
struct RenderArgs {
    /// Base URL of the running site
    #[arg(long, default_value = "http://127.0.0.1:3030")]
    url: String,

    /// Fetch the deployed JSON files instead of the document API
    #[arg(long)]
    static_files: bool,

    /// Language attribute of the rendered page
    #[arg(long, default_value = "fr")]
    lang: String,
}

impl RenderArgs {
    fn renderer(self) -> Renderer {
        let endpoint = if self.static_files {
            Endpoint::StaticFiles
        } else {
            Endpoint::Api
        };
        let source = Arc::new(HttpSource::new(self.url, endpoint));
        let config = RendererConfig {
            lang: self.lang,
            ..RendererConfig::default()
        };
        Renderer::new(source, config)
    }
}

fn init_tracing(default_level: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Serve(args) => {
            let config = args.into_config()?;
            init_tracing(config.log_level());
            run_api_server_with_config(config, None).await
        }
        Command::Render(args) => {
            init_tracing("warn");
            let page = args.renderer().render(Document::default()).await;
            println!("{}", page.to_html());
            if page.outcome == RenderOutcome::Failed {
                anyhow::bail!("Site config could not be loaded");
            }
            Ok(())
        }
    }
}
