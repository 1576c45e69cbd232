use app_showcase::{catalog, config, generate, output, types};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "app-showcase")]
#[command(about = "Static site generator for app catalog landing pages")]
#[command(long_about = "\
Static site generator for app catalog landing pages

One JSON catalog drives the whole site: a home page listing every app, a
landing page per app (features, download links, screenshot carousel) and a
privacy-policy page per app.

Site structure:

  site/
  ├── config.json        # App catalog (required)
  ├── showcase.toml      # Base URL, carousel timings, colors (optional)
  └── public/            # Copied verbatim to the output root
      └── images/

Output:

  dist/
  ├── index.html
  ├── {app}/index.html
  ├── {app}/privacy/index.html
  ├── 404.html
  ├── sitemap.xml, robots.txt
  └── assets/            # Fingerprinted CSS and JS

Run 'app-showcase gen-config' to generate a documented showcase.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Site directory containing config.json
    #[arg(long, default_value = "site", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render the full site into the output directory
    Build,
    /// Load and validate the catalog and config without writing anything
    Check,
    /// Print every generated route
    Routes {
        /// Print the route table as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print a stock showcase.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Build => {
            println!("==> Building {} → {}", cli.source.display(), cli.output.display());
            let report = generate::generate(&cli.source, &cli.output)?;
            output::print_build_output(&report);
            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let site_config = config::load_config(&cli.source)?;
            let catalog = catalog::load_catalog(&cli.source)?;
            output::print_check_output(&catalog, &site_config);
            println!("==> Site is valid");
        }
        Command::Routes { json } => {
            let catalog = catalog::load_catalog(&cli.source)?;
            let routes = types::routes(&catalog);
            if json {
                println!("{}", serde_json::to_string_pretty(&routes)?);
            } else {
                output::print_routes(&routes);
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
