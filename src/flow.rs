use anyhow::{bail, Result};

use crate::client::{self, Card, TrelloClient};

/// Everything needed to create one card
#[derive(Debug, Clone)]
pub struct AddCardRequest {
    pub board_id: String,
    pub list_name: String,
    pub name: String,
    pub desc: String,
    pub labels: Vec<String>,
    pub comment: String,
}

/// Result of a run that got at least as far as creating the card
#[derive(Debug)]
pub struct AddCardOutcome {
    pub card: Card,
    pub comment_added: bool,
    /// Set when the card was created but the follow-up comment failed.
    /// The card exists on the board either way.
    pub comment_error: Option<anyhow::Error>,
}

/// Run the full sequence: resolve list, resolve labels, create card,
/// post comment.
///
/// Steps are strictly sequential and forward-only; a failure before or at
/// card creation aborts the remainder and returns `Err`. Once `create_card`
/// succeeds the card exists regardless of later outcomes, so a comment
/// failure is reported inside the outcome instead of discarding the card.
/// An empty comment means no comment call is issued. Unmatched label titles
/// are warned about on stderr and dropped; an unmatched list name is fatal.
pub fn run(client: &TrelloClient, request: &AddCardRequest) -> Result<AddCardOutcome> {
    let lists = client.lists(&request.board_id)?;
    let Some(list) = client::find_list(&lists, &request.list_name) else {
        bail!(
            "No list found with name '{}' on board '{}'",
            request.list_name,
            request.board_id
        );
    };

    let mut label_ids = Vec::new();
    if !request.labels.is_empty() {
        let labels = client.labels(&request.board_id)?;
        let (ids, missing) = client::resolve_label_ids(&labels, &request.labels);
        for title in &missing {
            eprintln!("Warning: no label found with the title '{title}'");
        }
        label_ids = ids;
    }

    let card = client.create_card(&list.id, &request.name, &request.desc, &label_ids)?;

    let (comment_added, comment_error) = if request.comment.is_empty() {
        (false, None)
    } else {
        match client.add_comment(&card.id, &request.comment) {
            Ok(()) => (true, None),
            Err(err) => (false, Some(err)),
        }
    };

    Ok(AddCardOutcome {
        card,
        comment_added,
        comment_error,
    })
}
