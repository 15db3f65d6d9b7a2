//! Worker Module Tests
//!
//! Plays the coordinator side by hand over in-memory streams and loopback sockets.

#[cfg(test)]
mod tests {
    use crate::dataset::types::{Partition, Review};
    use crate::engine::recommend::RecommendationEngine;
    use crate::error::{RecommenderError, TransportError};
    use crate::protocol::codec::{read_frame, write_frame};
    use crate::protocol::messages::{WorkMessage, WorkerResult};
    use crate::worker::client::{WorkerClient, WorkerOutcome};
    use std::time::Duration;
    use tokio::io::{AsyncReadExt, AsyncWriteExt, BufReader};

    fn review(user: &str, product: &str, stars: f64) -> Review {
        Review {
            review_id: format!("{}-{}", user, product),
            product_id: product.to_string(),
            reviewer_id: user.to_string(),
            stars,
            category: "books".to_string(),
        }
    }

    #[tokio::test]
    async fn test_worker_processes_offer_and_closes_write_side() {
        let (worker_end, coordinator_end) = tokio::io::duplex(64 * 1024);
        let partition = Partition::new(
            4,
            vec![review("A", "P", 5.0), review("B", "P", 5.0), review("B", "Q", 5.0)],
        );

        let coordinator = tokio::spawn(async move {
            let mut stream = BufReader::new(coordinator_end);
            write_frame(&mut stream, &WorkMessage::PartitionOffer(partition))
                .await
                .unwrap();
            let result: WorkerResult = read_frame(&mut stream).await.unwrap();

            // Nothing else follows the result.
            let mut rest = Vec::new();
            stream.read_to_end(&mut rest).await.unwrap();
            assert!(rest.is_empty());
            result
        });

        let outcome = WorkerClient::default().process(worker_end).await.unwrap();
        let result = coordinator.await.unwrap();

        assert_eq!(
            outcome,
            WorkerOutcome::Processed {
                partition: 4,
                reviews: 3,
                users: 2
            }
        );
        assert_eq!(result.recommendations["A"], vec!["Q".to_string()]);
    }

    #[tokio::test]
    async fn test_worker_exits_on_no_more_work() {
        let (worker_end, mut coordinator_end) = tokio::io::duplex(1024);
        write_frame(&mut coordinator_end, &WorkMessage::NoMoreWork)
            .await
            .unwrap();

        let outcome = WorkerClient::default().process(worker_end).await.unwrap();

        assert_eq!(outcome, WorkerOutcome::NoMoreWork);
    }

    #[tokio::test]
    async fn test_worker_rejects_malformed_message() {
        let (worker_end, mut coordinator_end) = tokio::io::duplex(1024);
        coordinator_end.write_all(b"{\"hello\":1}\n").await.unwrap();

        let result = WorkerClient::default().process(worker_end).await;

        assert!(matches!(result, Err(RecommenderError::Decode(_))));
    }

    #[tokio::test]
    async fn test_worker_uses_configured_threshold() {
        let (worker_end, coordinator_end) = tokio::io::duplex(64 * 1024);
        let partition = Partition::new(
            0,
            vec![review("A", "P", 5.0), review("B", "P", 5.0), review("B", "Q", 3.0)],
        );

        let coordinator = tokio::spawn(async move {
            let mut stream = BufReader::new(coordinator_end);
            write_frame(&mut stream, &WorkMessage::PartitionOffer(partition))
                .await
                .unwrap();
            read_frame::<_, WorkerResult>(&mut stream).await.unwrap()
        });

        let client = WorkerClient::new(RecommendationEngine::new(4.0));
        client.process(worker_end).await.unwrap();

        let result = coordinator.await.unwrap();
        assert!(result.recommendations["A"].is_empty());
    }

    #[tokio::test]
    async fn test_worker_connection_refused() {
        // Bind then drop to get a port nobody listens on.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap().to_string();
        drop(listener);

        let result = WorkerClient::default()
            .run(&address, Duration::from_secs(2))
            .await;

        assert!(matches!(
            result,
            Err(RecommenderError::Transport(TransportError::Io(_)))
        ));
    }
}
