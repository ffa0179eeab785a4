use anyhow::Result;
use clap::Parser;

use trello_add_card::flow::{self, AddCardRequest};
use trello_add_card::{Config, TrelloClient};

#[derive(Parser)]
#[command(author, version = env!("CARGO_PKG_VERSION"), about = "Add a card to a Trello board list (column) by list name", long_about = None)]
struct Cli {
    /// The ID of the Trello board
    #[arg(long)]
    board_id: String,

    /// The name of the Trello list (column), matched case-insensitively
    #[arg(long)]
    list_name: String,

    /// The name of the card to create
    #[arg(long)]
    name: String,

    /// The description of the card
    #[arg(long, default_value = "")]
    desc: String,

    /// One or more label titles to attach to the card
    #[arg(long, num_args = 0..)]
    labels: Vec<String>,

    /// A comment to add to the newly created card
    #[arg(long, default_value = "")]
    comment: String,

    /// Output results as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::from_env()?;
    let client = TrelloClient::new(&config)?;

    let request = AddCardRequest {
        board_id: cli.board_id,
        list_name: cli.list_name,
        name: cli.name,
        desc: cli.desc,
        labels: cli.labels,
        comment: cli.comment,
    };

    let outcome = flow::run(&client, &request)?;

    if cli.json {
        let result = serde_json::json!({
            "id": outcome.card.id,
            "short_url": outcome.card.short_url,
            "comment_added": outcome.comment_added,
        });
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("Card created: {}", outcome.card.short_url);
        if outcome.comment_added {
            println!("Comment added to the card.");
        }
    }

    // The card exists even when the comment step failed; report the
    // failure only after the card has been printed.
    if let Some(err) = outcome.comment_error {
        return Err(err);
    }

    Ok(())
}
