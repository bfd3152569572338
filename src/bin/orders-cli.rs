use clap::Parser;
use serde_json::Value;

#[derive(Parser)]
#[command(name = "orders-cli")]
#[command(about = "Look up a customer's orders through a running gateway", long_about = None)]
struct Cli {
    /// Gateway base URL.
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    /// Customer email address.
    email: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/orders/", cli.url.trim_end_matches('/')))
        .query(&[("email", cli.email.as_str())])
        .send()
        .await?;

    let status = res.status();
    let body = res.text().await?;

    match serde_json::from_str::<Value>(&body) {
        Ok(json) if status.is_success() => println!("{}", serde_json::to_string_pretty(&json)?),
        Ok(json) => {
            eprintln!("Error: gateway returned status {}", status);
            eprintln!("{}", serde_json::to_string_pretty(&json)?);
            std::process::exit(1);
        }
        Err(_) => {
            eprintln!("Error: gateway returned status {}", status);
            eprintln!("Response: {}", body);
            std::process::exit(1);
        }
    }

    Ok(())
}
