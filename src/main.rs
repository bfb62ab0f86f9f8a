// SPDX-License-Identifier: MIT

use clap::Parser;
use dotenv::dotenv;
use std::path::PathBuf;
use std::sync::Arc;
use url::Url;

use concheck::config::NotifyConfig;
use concheck::notify::template::DEFAULT_TEMPLATE_PATH;
use concheck::notify::{MailTemplate, Notifier};
use concheck::runner::{Invocation, Runner};
use concheck::source::{HttpFetcher, StdinInput};

/// Check whether a webpage satisfies an XPath condition
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// HTML text of the webpage to analyze
    html: Option<String>,

    /// URL of the webpage to analyze
    #[arg(short, long)]
    url: Option<Url>,

    /// XPath with the condition to check for, e.g. `boolean(//div[@class="active"])`
    #[arg(short = 'p', long)]
    xpath: String,

    /// Email to notify when the condition is detected as satisfied
    #[arg(short, long)]
    notify: Option<String>,

    /// HTML template for the notification email
    #[arg(short, long, default_value = DEFAULT_TEMPLATE_PATH)]
    template: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::init();

    let args = Args::parse();

    // Validate notification settings before any fetch or parse work
    let notifier = match &args.notify {
        Some(recipient) => {
            let config = NotifyConfig::from_env()?;
            let template = MailTemplate::load(&args.template)?;
            log::info!("Will notify {} from {}", recipient, config.from_header());
            Some(Notifier::resend(&config, template))
        }
        None => None,
    };

    let mut runner = Runner::new(
        Arc::new(HttpFetcher::new()),
        Box::new(StdinInput),
        std::io::stdout(),
    );
    if let Some(notifier) = notifier {
        runner = runner.with_notifier(notifier);
    }

    runner
        .run(Invocation {
            text: args.html,
            url: args.url,
            predicate: args.xpath,
            recipient: args.notify,
        })
        .await?;

    Ok(())
}
