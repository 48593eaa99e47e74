use clap::{Parser, Subcommand};
use http_blog::api::{ApiClient, NewPost};
use http_blog::config::{ApiConfig, Environment};

#[derive(Parser)]
#[command(name = "blog-cli")]
#[command(about = "Query the posts API through the blog's API client", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "https://jsonplaceholder.typicode.com")]
    url: String,

    /// External status message table (TOML or JSON).
    #[arg(short, long)]
    status_messages: Option<String>,

    #[arg(long, default_value_t = 60)]
    timeout_secs: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch all posts and print the envelope
    List,
    /// Create a post and print the envelope
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        body: String,
        #[arg(long)]
        id: Option<u64>,
    },
    /// Print the resolved status message table
    StatusTable,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = ApiConfig {
        base_url: cli.url,
        timeout_secs: cli.timeout_secs,
        status_messages_path: cli.status_messages,
        reject_error_status: false,
    };
    let client = ApiClient::create(&config, Environment::Production).await?;

    match cli.command {
        Commands::List => {
            let envelope = client.list_posts().await;
            println!("{}", serde_json::to_string_pretty(&envelope)?);
        }
        Commands::Create { title, body, id } => {
            let envelope = client.save_post(&NewPost { title, body, id }).await;
            println!("{}", serde_json::to_string_pretty(&envelope)?);
        }
        Commands::StatusTable => {
            for (code, message) in client.status_messages().entries() {
                println!("{code}\t{message}");
            }
        }
    }

    Ok(())
}
