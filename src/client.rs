use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

use crate::config::Config;

/// Client for the Trello REST API
pub struct TrelloClient {
    api_base: String,
    key: String,
    token: String,
    client: reqwest::blocking::Client,
}

/// A list (column) on a board
#[derive(Debug, Deserialize)]
pub struct TrelloList {
    pub id: String,
    pub name: String,
}

/// A board-scoped label; color-only labels come back with an empty name
#[derive(Debug, Deserialize)]
pub struct TrelloLabel {
    pub id: String,
    #[serde(default)]
    pub name: String,
}

/// The created card, as returned by the API
#[derive(Debug, Deserialize)]
pub struct Card {
    pub id: String,
    #[serde(rename = "shortUrl")]
    pub short_url: String,
}

impl TrelloClient {
    /// Create a new Trello client
    pub fn new(config: &Config) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("trello-add-card/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(30))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            api_base: config.api_base.trim_end_matches('/').to_string(),
            key: config.key.clone(),
            token: config.token.clone(),
            client,
        })
    }

    fn auth(&self) -> [(&'static str, &str); 2] {
        [("key", &self.key), ("token", &self.token)]
    }

    /// All lists on a board, in the order the service returns them
    pub fn lists(&self, board_id: &str) -> Result<Vec<TrelloList>> {
        let url = format!("{}/1/boards/{}/lists", self.api_base, board_id);
        let response = self
            .client
            .get(&url)
            .query(&self.auth())
            .send()
            .with_context(|| format!("Failed to fetch lists for board '{board_id}'"))?;

        if !response.status().is_success() {
            bail!(
                "Failed to fetch lists for board '{}': HTTP {}",
                board_id,
                response.status()
            );
        }

        response.json().context("Failed to parse lists response")
    }

    /// All labels on a board
    pub fn labels(&self, board_id: &str) -> Result<Vec<TrelloLabel>> {
        let url = format!("{}/1/boards/{}/labels", self.api_base, board_id);
        let response = self
            .client
            .get(&url)
            .query(&self.auth())
            .send()
            .with_context(|| format!("Failed to fetch labels for board '{board_id}'"))?;

        if !response.status().is_success() {
            bail!(
                "Failed to fetch labels for board '{}': HTTP {}",
                board_id,
                response.status()
            );
        }

        response.json().context("Failed to parse labels response")
    }

    /// Create a card on a list. Label ids are passed through unmodified.
    pub fn create_card(
        &self,
        list_id: &str,
        name: &str,
        desc: &str,
        label_ids: &[String],
    ) -> Result<Card> {
        let url = format!("{}/1/cards", self.api_base);

        let mut query: Vec<(String, String)> = vec![
            ("key".to_string(), self.key.clone()),
            ("token".to_string(), self.token.clone()),
            ("idList".to_string(), list_id.to_string()),
            ("name".to_string(), name.to_string()),
            ("desc".to_string(), desc.to_string()),
        ];

        // The API accepts label ids as an indexed array in the query string
        for (i, id) in label_ids.iter().enumerate() {
            query.push((format!("idLabels[{i}]"), id.clone()));
        }

        let response = self
            .client
            .post(&url)
            .query(&query)
            .send()
            .context("Failed to create card")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            bail!("Failed to create card: HTTP {status}: {body}");
        }

        response.json().context("Failed to parse card response")
    }

    /// Post a comment on a card. The comment body returned by the API is
    /// not used beyond success.
    pub fn add_comment(&self, card_id: &str, text: &str) -> Result<()> {
        let url = format!("{}/1/cards/{}/actions/comments", self.api_base, card_id);
        let response = self
            .client
            .post(&url)
            .query(&[("key", self.key.as_str()), ("token", &self.token), ("text", text)])
            .send()
            .with_context(|| format!("Failed to add comment to card '{card_id}'"))?;

        let status = response.status();
        if !status.is_success() {
            bail!("Failed to add comment to card '{card_id}': HTTP {status}");
        }

        Ok(())
    }
}

/// First list whose name matches case-insensitively, in service order.
/// Duplicate names resolve to whichever the service returned first.
pub fn find_list<'a>(lists: &'a [TrelloList], name: &str) -> Option<&'a TrelloList> {
    let wanted = name.to_lowercase();
    lists.iter().find(|list| list.name.to_lowercase() == wanted)
}

/// Resolve label titles to ids, case-insensitively.
///
/// Returns the resolved ids in request order and the titles that matched
/// nothing. Labels without a name are skipped; duplicate label names keep
/// the last id seen.
pub fn resolve_label_ids(labels: &[TrelloLabel], titles: &[String]) -> (Vec<String>, Vec<String>) {
    let by_title: HashMap<String, &str> = labels
        .iter()
        .filter(|label| !label.name.is_empty())
        .map(|label| (label.name.to_lowercase(), label.id.as_str()))
        .collect();

    let mut ids = Vec::new();
    let mut missing = Vec::new();
    for title in titles {
        match by_title.get(&title.to_lowercase()) {
            Some(id) => ids.push((*id).to_string()),
            None => missing.push(title.clone()),
        }
    }

    (ids, missing)
}
