use clap::{Args, Parser, Subcommand};
use notion_md::{
    BlockSource, ConvertConfig, JsonSource, MarkdownBlock, MarkdownConverter, NotionClient,
};
use std::path::{Path, PathBuf};
use tracing::{debug, error};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a page fetched from the Notion API
    Page {
        /// ID of the page to convert
        page_id: String,
        /// Integration secret
        #[arg(long, env = "NOTION_API_SECRET", hide_env_values = true)]
        token: String,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Convert an exported "list block children" response
    File {
        /// Blocks JSON file
        blocks: PathBuf,
        /// Page JSON file supplying the title
        #[arg(long)]
        page: Option<PathBuf>,
        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(Args)]
struct OutputArgs {
    /// Print the Markdown blocks as JSON instead of a document
    #[arg(long)]
    json: bool,
    /// Fail on block types with no Markdown rendering
    #[arg(long)]
    strict: bool,
    /// Leave the page title out
    #[arg(long)]
    no_title: bool,
}

impl OutputArgs {
    fn config(&self) -> ConvertConfig {
        let config = if self.strict {
            ConvertConfig::strict()
        } else {
            ConvertConfig::lenient()
        };
        config.with_title(!self.no_title)
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "notion_md=info,notion_md_cli=info".into()),
        )
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Page {
            page_id,
            token,
            output,
        } => page_command(&page_id, &token, &output).await,
        Commands::File {
            blocks,
            page,
            output,
        } => file_command(&blocks, page.as_deref(), &output).await,
    }
}

async fn page_command(page_id: &str, token: &str, output: &OutputArgs) {
    let client = match NotionClient::from_token(token) {
        Ok(client) => client,
        Err(err) => {
            error!("{err}");
            eprintln!("Error: {err}");
            std::process::exit(1);
        }
    };
    debug!(%page_id, "converting page from the Notion API");
    let converter = MarkdownConverter::with_config(client, output.config());
    emit(&converter, page_id, output.json).await;
}

async fn file_command(blocks: &Path, page: Option<&Path>, output: &OutputArgs) {
    let mut source = JsonSource::new(blocks);
    if let Some(page) = page {
        source = source.with_page(page);
    }
    // The file stem stands in for the page ID.
    let page_id = blocks
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .filter(|stem| !stem.trim().is_empty())
        .unwrap_or_else(|| "page".to_string());

    // Without a page file there is no title to look for.
    let config = output.config().with_title(!output.no_title && page.is_some());
    debug!(path = %blocks.display(), %page_id, "converting exported blocks");
    let converter = MarkdownConverter::with_config(source, config);
    emit(&converter, &page_id, output.json).await;
}

async fn emit<S: BlockSource>(converter: &MarkdownConverter<S>, page_id: &str, json: bool) {
    let md_blocks = match converter.page_to_markdown_blocks(page_id).await {
        Ok(md_blocks) => md_blocks,
        Err(err) => {
            error!("{err}");
            eprintln!("Error: {err}");
            std::process::exit(1);
        }
    };

    if json {
        print_json(&md_blocks);
    } else {
        print!("{}", converter.to_markdown_string(&md_blocks));
    }
}

fn print_json(md_blocks: &[MarkdownBlock]) {
    match serde_json::to_string_pretty(md_blocks) {
        Ok(output) => println!("{output}"),
        Err(err) => {
            error!("{err}");
            eprintln!("Error: {err}");
            std::process::exit(1);
        }
    }
}
