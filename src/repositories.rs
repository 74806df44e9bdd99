use crate::{domain::MemeRepository, errors::RepoError, models::MemeRecord};
use anyhow::Context;
use async_trait::async_trait;
use aws_sdk_dynamodb::{Client as DynamoDbClient, types::AttributeValue};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tracing::{self, info};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct DynamoDbMemeRepository {
    client: DynamoDbClient,
    table_name: String, // Store the table name
}

impl DynamoDbMemeRepository {
    /// Creates a new repository instance configured for a specific table.
    pub fn new(client: DynamoDbClient, table_name: String) -> Self {
        info!(%table_name, "Initializing DynamoDbMemeRepository");
        Self { client, table_name }
    }
}

#[async_trait]
impl MemeRepository for DynamoDbMemeRepository {
    /// Stores a `MemeRecord` in the DynamoDB table using PutItem.
    async fn save(&self, record: &MemeRecord) -> Result<Uuid, RepoError> {
        self.client
            .put_item()
            .table_name(&self.table_name) // Use stored table name
            .item("meme_id", AttributeValue::S(record.meme_id.to_string()))
            .item("template_id", AttributeValue::S(record.template_id.clone()))
            .item("image_url", AttributeValue::S(record.image_url.clone()))
            .item("user", AttributeValue::S(record.user.clone()))
            .item("created_at", AttributeValue::S(record.created_at.to_rfc3339()))
            .send()
            .await
            .context(format!(
                "DynamoDB (table: {}): Failed to put meme (id: {})",
                self.table_name, record.meme_id
            ))
            .map_err(RepoError::BackendError)?; // Map anyhow::Error -> RepoError
        Ok(record.meme_id)
    }

    /// Lists all memes using DynamoDB Scan. Handles pagination.
    async fn list_all(&self) -> Result<Vec<MemeRecord>, RepoError> {
        tracing::debug!("DynamoDB: Scanning table '{}' for all memes", self.table_name);
        let mut records: Vec<MemeRecord> = Vec::new();
        let mut last_evaluated_key: Option<HashMap<String, AttributeValue>> = None;

        loop {
            let mut request_builder = self.client.scan().table_name(&self.table_name); // Use stored table name

            // Apply ExclusiveStartKey if paginating from previous response
            if let Some(lek) = last_evaluated_key {
                request_builder = request_builder.set_exclusive_start_key(Some(lek));
            }

            let resp = request_builder
                .send()
                .await
                .context(format!("DynamoDB: Failed to scan table '{}'", self.table_name))
                .map_err(RepoError::BackendError)?;

            if let Some(items) = resp.items {
                tracing::debug!(
                    "DynamoDB Scan (table: {}): Returned {} items",
                    self.table_name,
                    items.len()
                );
                for item in items {
                    match item_to_record(&item) {
                        Some(record) => records.push(record),
                        None => {
                            let item_id = item.get("meme_id").and_then(|v| v.as_s().ok());
                            tracing::error!(item.id = ?item_id, table_name = %self.table_name, "DynamoDB: Failed to parse item from scan into MemeRecord");
                            // Fail fast if data in the table is corrupt
                            return Err(RepoError::DataCorruption(format!(
                                "DynamoDB: Failed to parse item {:?} during scan of table '{}'",
                                item_id, self.table_name
                            )));
                        }
                    }
                }
            } else {
                tracing::debug!(
                    "DynamoDB Scan (table: {}): Returned no items in this page.",
                    self.table_name
                );
            }

            // Check for next page
            last_evaluated_key = resp.last_evaluated_key;
            if last_evaluated_key.is_none() {
                break; // Exit loop if no more pages
            }
        }

        // Scan order is undefined; created_at recovers insertion order.
        records.sort_by_key(|r| r.created_at);

        tracing::info!(
            "DynamoDB (table: {}): Successfully listed {} memes",
            self.table_name,
            records.len()
        );
        Ok(records)
    }
}

// Helper function to convert a DynamoDB item map to a MemeRecord.
// Remains internal to this module.
fn item_to_record(item: &HashMap<String, AttributeValue>) -> Option<MemeRecord> {
    let meme_id = item
        .get("meme_id")?
        .as_s()
        .ok()
        .and_then(|s| Uuid::parse_str(s).ok())?;
    let template_id = item.get("template_id")?.as_s().ok()?.to_string();
    let image_url = item.get("image_url")?.as_s().ok()?.to_string();
    let user = item.get("user")?.as_s().ok()?.to_string();
    let created_at = item
        .get("created_at")?
        .as_s()
        .ok()
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())?
        .with_timezone(&Utc);

    Some(MemeRecord {
        meme_id,
        template_id,
        image_url,
        user,
        created_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_round_trips_through_attribute_map() {
        let record = MemeRecord::new(
            "112126428".to_string(),
            "https://i.imgflip.com/abc.jpg".to_string(),
            "dan".to_string(),
        );

        let mut item = HashMap::new();
        item.insert("meme_id".to_string(), AttributeValue::S(record.meme_id.to_string()));
        item.insert("template_id".to_string(), AttributeValue::S(record.template_id.clone()));
        item.insert("image_url".to_string(), AttributeValue::S(record.image_url.clone()));
        item.insert("user".to_string(), AttributeValue::S(record.user.clone()));
        item.insert(
            "created_at".to_string(),
            AttributeValue::S(record.created_at.to_rfc3339()),
        );

        let parsed = item_to_record(&item).unwrap();
        assert_eq!(parsed, record);
    }

    #[test]
    fn incomplete_item_is_rejected() {
        let mut item = HashMap::new();
        item.insert(
            "meme_id".to_string(),
            AttributeValue::S(Uuid::new_v4().to_string()),
        );

        assert!(item_to_record(&item).is_none());
    }
}
