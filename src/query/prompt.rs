//! Terminal Prompt
//!
//! Line-oriented lookup over the published rankings. Generic over its input and
//! output so it can be driven from stdin/stdout or from a test buffer.

use crate::aggregator::store::RecommendationStore;
use crate::dataset::types::normalize_category;
use crate::error::Result;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

/// How many products a lookup prints.
pub const PROMPT_LIMIT: usize = 10;

const PROMPT: &str = "Enter product category (type 'categories' to list, 'exit' to quit): ";

/// Reads commands until `exit` or end of input.
pub async fn run_prompt<R, W>(store: &RecommendationStore, input: R, mut output: W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();

    output
        .write_all(b"Recommendations are ready. Enter a product category to look it up.\n")
        .await?;

    loop {
        output.write_all(PROMPT.as_bytes()).await?;
        output.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let command = normalize_category(&line);

        let reply = match command.as_str() {
            "" => continue,
            "exit" => {
                output.write_all(b"Exiting.\n").await?;
                break;
            }
            "categories" => list_categories(store).await,
            category => lookup(store, category).await,
        };
        output.write_all(reply.as_bytes()).await?;
    }

    output.flush().await?;
    Ok(())
}

async fn list_categories(store: &RecommendationStore) -> String {
    let categories = store.categories().await;
    if categories.is_empty() {
        return "No categories available.\n".to_string();
    }

    let mut reply = String::from("Available categories:\n");
    for category in categories {
        reply.push_str(&format!("- {}\n", category));
    }
    reply
}

async fn lookup(store: &RecommendationStore, category: &str) -> String {
    if !store.is_ready().await {
        return "Recommendations are not ready yet. Please try again later.\n".to_string();
    }

    let products = store.query_category(category).await;
    if products.is_empty() {
        return format!("No recommendations found for the category '{}'.\n", category);
    }

    let top: Vec<&String> = products.iter().take(PROMPT_LIMIT).collect();
    let mut reply = format!(
        "Top {} recommendations for category '{}':\n",
        top.len(),
        category
    );
    for (rank, product_id) in top.iter().enumerate() {
        reply.push_str(&format!("{}. {}\n", rank + 1, product_id));
    }
    reply
}
