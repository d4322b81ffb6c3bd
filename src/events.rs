// Events that flow from request tasks to the TUI
//
// Every network request runs in its own tokio task and reports back over an
// mpsc channel. Page-related events carry the ticket of the controller state
// that issued them so the event loop can drop stale replies.

use crate::api::models::{Action, Field, Product, ProductId};
use crate::api::{ApiClient, ApiError};
use crate::catalog::product::fetch_product;
use crate::catalog::RequestTicket;
use futures::StreamExt;
use tokio::sync::mpsc;

/// Reply from a request task
#[derive(Debug)]
pub enum CatalogEvent {
    /// Identifiers for the page requested under `ticket`
    Ids {
        ticket: RequestTicket,
        result: Result<Vec<ProductId>, ApiError>,
    },

    /// Identifiers used to compute the total count
    Count {
        ticket: RequestTicket,
        result: Result<Vec<ProductId>, ApiError>,
    },

    /// Details for one product slot
    Detail {
        ticket: RequestTicket,
        index: usize,
        id: ProductId,
        result: Result<Option<Product>, ApiError>,
    },

    /// Distinct values offered for a filter field
    FieldValues {
        ticket: RequestTicket,
        field: Field,
        result: Result<Vec<serde_json::Value>, ApiError>,
    },
}

/// Spawns request tasks that report back as `CatalogEvent`s
///
/// Cheap to clone; holds the shared client and a channel sender.
#[derive(Clone)]
pub struct Fetcher {
    client: ApiClient,
    tx: mpsc::Sender<CatalogEvent>,
    detail_concurrency: usize,
}

impl Fetcher {
    pub fn new(client: ApiClient, tx: mpsc::Sender<CatalogEvent>, detail_concurrency: usize) -> Self {
        Self {
            client,
            tx,
            detail_concurrency: detail_concurrency.max(1),
        }
    }

    /// Issue the id request and the count request for `ticket`
    ///
    /// The two run independently; either may arrive first.
    pub fn fetch_page(&self, ticket: RequestTicket, ids: Action, count: Action) {
        tracing::debug!("Fetching page for {} ({} / {})", ticket, ids.name(), count.name());

        let (client, tx) = (self.client.clone(), self.tx.clone());
        tokio::spawn(async move {
            let result = client.call(&ids).await;
            let _ = tx.send(CatalogEvent::Ids { ticket, result }).await;
        });

        let (client, tx) = (self.client.clone(), self.tx.clone());
        tokio::spawn(async move {
            let result = client.call(&count).await;
            let _ = tx.send(CatalogEvent::Count { ticket, result }).await;
        });
    }

    /// Resolve every slot of a page, at most `detail_concurrency` at a time
    ///
    /// Each reply is sent as soon as it completes, in any order.
    pub fn fetch_details(&self, ticket: RequestTicket, slots: Vec<(usize, ProductId)>) {
        if slots.is_empty() {
            return;
        }
        let (client, tx, limit) = (self.client.clone(), self.tx.clone(), self.detail_concurrency);
        tokio::spawn(async move {
            futures::stream::iter(slots)
                .for_each_concurrent(limit, |(index, id)| {
                    let client = &client;
                    let tx = tx.clone();
                    async move {
                        let result = fetch_product(client, &id).await;
                        let _ = tx
                            .send(CatalogEvent::Detail {
                                ticket,
                                index,
                                id,
                                result,
                            })
                            .await;
                    }
                })
                .await;
        });
    }

    /// Fetch the values offered for `field` with the form's request
    pub fn fetch_field_values(&self, ticket: RequestTicket, field: Field, request: Action) {
        let (client, tx) = (self.client.clone(), self.tx.clone());
        tokio::spawn(async move {
            let result = client.call(&request).await;
            let _ = tx
                .send(CatalogEvent::FieldValues {
                    ticket,
                    field,
                    result,
                })
                .await;
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::tests::{client_for, mock_catalog, ok};
    use crate::catalog::CatalogController;
    use serde_json::json;

    async fn fetcher_for(
        handler: impl Fn(&serde_json::Value) -> (axum::http::StatusCode, String)
            + Send
            + Sync
            + 'static,
    ) -> (Fetcher, mpsc::Receiver<CatalogEvent>) {
        let (url, _) = mock_catalog(handler).await;
        let (tx, rx) = mpsc::channel(16);
        (Fetcher::new(client_for(&url), tx, 2), rx)
    }

    #[tokio::test]
    async fn page_fetch_reports_ids_and_count() {
        let (fetcher, mut rx) = fetcher_for(|body| match body["params"].get("limit") {
            Some(_) => ok(json!(["a", "b"])),
            None => ok(json!(["a", "b", "c"])),
        })
        .await;

        let controller = CatalogController::default();
        let ticket = controller.ticket();
        fetcher.fetch_page(ticket, controller.ids_request(), controller.count_request());

        let mut ids = None;
        let mut count = None;
        for _ in 0..2 {
            match rx.recv().await.unwrap() {
                CatalogEvent::Ids { ticket: t, result } => {
                    assert_eq!(t, ticket);
                    ids = Some(result.unwrap().len());
                }
                CatalogEvent::Count { ticket: t, result } => {
                    assert_eq!(t, ticket);
                    count = Some(result.unwrap().len());
                }
                other => panic!("unexpected event: {:?}", other),
            }
        }
        assert_eq!(ids, Some(2));
        assert_eq!(count, Some(3));
    }

    #[tokio::test]
    async fn details_arrive_for_every_slot() {
        let (fetcher, mut rx) = fetcher_for(|body| {
            let id = body["params"]["ids"][0].as_str().unwrap_or_default().to_string();
            ok(json!([{ "id": id, "product": format!("Item {}", id), "price": 10.0, "brand": null }]))
        })
        .await;

        let ticket = CatalogController::default().ticket();
        let slots: Vec<_> = ["x", "y", "z"]
            .iter()
            .enumerate()
            .map(|(i, id)| (i, ProductId::from(*id)))
            .collect();
        fetcher.fetch_details(ticket, slots);

        let mut seen = Vec::new();
        for _ in 0..3 {
            match rx.recv().await.unwrap() {
                CatalogEvent::Detail { index, id, result, .. } => {
                    let product = result.unwrap().unwrap();
                    assert_eq!(product.id, id);
                    seen.push(index);
                }
                other => panic!("unexpected event: {:?}", other),
            }
        }
        seen.sort();
        assert_eq!(seen, vec![0, 1, 2]);
    }

    #[tokio::test]
    async fn field_values_are_forwarded() {
        let (fetcher, mut rx) = fetcher_for(|_| ok(json!(["Acme", null, "Globex"]))).await;

        let controller = CatalogController::default();
        let (ticket, request) = controller.field_values_request(Field::Brand);
        fetcher.fetch_field_values(ticket, Field::Brand, request);

        match rx.recv().await.unwrap() {
            CatalogEvent::FieldValues {
                ticket: t,
                field,
                result,
            } => {
                assert_eq!(t, ticket);
                assert_eq!(field, Field::Brand);
                assert_eq!(result.unwrap().len(), 3);
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }
}
