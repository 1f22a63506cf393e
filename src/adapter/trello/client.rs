use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::adapter::types::*;
use crate::adapter::TaskBoard;
use crate::config::TrelloConfig;
use crate::error::{AppError, Result};

const TRELLO_API_URL: &str = "https://api.trello.com/1";

pub struct TrelloAdapter {
    client: Client,
    api_key: String,
    api_token: String,
}

impl TrelloAdapter {
    pub fn new(config: &TrelloConfig) -> Self {
        Self {
            client: Client::new(),
            api_key: config.api_key.clone(),
            api_token: config.api_token.clone(),
        }
    }

    fn auth(&self) -> [(&'static str, &str); 2] {
        [("key", self.api_key.as_str()), ("token", self.api_token.as_str())]
    }

    async fn execute<T>(&self, request: reqwest::RequestBuilder, context: &str) -> Result<T>
    where
        T: for<'de> Deserialize<'de>,
    {
        let response = request.query(&self.auth()).send().await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(AppError::NotFound(context.to_string()));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Adapter(format!(
                "Trello API returned {status} for {context}: {body}"
            )));
        }

        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl TaskBoard for TrelloAdapter {
    async fn create_card(&self, card: &CreateCard) -> Result<Card> {
        let mut params = vec![
            ("idList".to_string(), card.list_id.clone()),
            ("name".to_string(), card.title.clone()),
            ("desc".to_string(), card.description.clone()),
        ];
        if let Some(due) = &card.due {
            params.push(("due".to_string(), due.clone()));
        }
        if !card.label_ids.is_empty() {
            params.push(("idLabels".to_string(), card.label_ids.join(",")));
        }
        if !card.member_ids.is_empty() {
            params.push(("idMembers".to_string(), card.member_ids.join(",")));
        }

        let request = self
            .client
            .post(format!("{TRELLO_API_URL}/cards"))
            .query(&params);
        let created: TrelloCard = self.execute(request, "create card").await?;
        Ok(created.into())
    }

    async fn update_card(&self, card_id: &str, fields: &CardFields) -> Result<Card> {
        let mut params: Vec<(&str, String)> = Vec::new();
        if let Some(name) = &fields.name {
            params.push(("name", name.clone()));
        }
        if let Some(description) = &fields.description {
            params.push(("desc", description.clone()));
        }
        if let Some(closed) = fields.closed {
            params.push(("closed", closed.to_string()));
        }
        if let Some(due) = &fields.due {
            params.push(("due", due.clone()));
        }

        let request = self
            .client
            .put(format!("{TRELLO_API_URL}/cards/{card_id}"))
            .query(&params);
        let updated: TrelloCard = self
            .execute(request, &format!("update card {card_id}"))
            .await?;
        Ok(updated.into())
    }

    async fn move_card(&self, card_id: &str, list_id: &str) -> Result<Card> {
        let request = self
            .client
            .put(format!("{TRELLO_API_URL}/cards/{card_id}"))
            .query(&[("idList", list_id)]);
        let moved: TrelloCard = self
            .execute(request, &format!("move card {card_id}"))
            .await?;
        Ok(moved.into())
    }

    async fn add_comment(&self, card_id: &str, text: &str) -> Result<Comment> {
        let request = self
            .client
            .post(format!("{TRELLO_API_URL}/cards/{card_id}/actions/comments"))
            .query(&[("text", text)]);
        let action: TrelloAction = self
            .execute(request, &format!("comment on card {card_id}"))
            .await?;

        Ok(Comment {
            id: action.id,
            text: action.data.text,
        })
    }

    async fn list_boards(&self) -> Result<Vec<Board>> {
        let request = self.client.get(format!("{TRELLO_API_URL}/members/me/boards"));
        let boards: Vec<TrelloBoard> = self.execute(request, "list boards").await?;
        Ok(boards
            .into_iter()
            .map(|b| Board { id: b.id, name: b.name })
            .collect())
    }

    async fn list_lists(&self, board_id: &str) -> Result<Vec<BoardList>> {
        let request = self
            .client
            .get(format!("{TRELLO_API_URL}/boards/{board_id}/lists"));
        let lists: Vec<TrelloList> = self
            .execute(request, &format!("list lists of board {board_id}"))
            .await?;
        Ok(lists
            .into_iter()
            .map(|l| BoardList { id: l.id, name: l.name })
            .collect())
    }

    async fn list_cards(&self, list_id: &str) -> Result<Vec<Card>> {
        let request = self
            .client
            .get(format!("{TRELLO_API_URL}/lists/{list_id}/cards"));
        let cards: Vec<TrelloCard> = self
            .execute(request, &format!("list cards of list {list_id}"))
            .await?;
        Ok(cards.into_iter().map(Into::into).collect())
    }
}

// --- Wire types ---

#[derive(Debug, Deserialize)]
struct TrelloCard {
    id: String,
    name: String,
    #[serde(default)]
    closed: bool,
    #[serde(rename = "idList", default)]
    id_list: String,
    #[serde(rename = "shortUrl", default)]
    short_url: String,
}

impl From<TrelloCard> for Card {
    fn from(card: TrelloCard) -> Self {
        Card {
            id: card.id,
            name: card.name,
            list_id: card.id_list,
            url: card.short_url,
            closed: card.closed,
        }
    }
}

#[derive(Debug, Deserialize)]
struct TrelloAction {
    id: String,
    #[serde(default)]
    data: TrelloActionData,
}

#[derive(Debug, Default, Deserialize)]
struct TrelloActionData {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
struct TrelloBoard {
    id: String,
    name: String,
}

#[derive(Debug, Deserialize)]
struct TrelloList {
    id: String,
    name: String,
}
