use std::fmt::Write;

use crate::{
    models::{BlockBody, ItemCard, RecommendationBlock, RecommendationResponse, RecommendedItem},
    services::metadata::MetadataResolver,
};

pub const COLLABORATIVE_TITLE: &str = "Neural Collaborative Filtering (NCF) Recommendations";
pub const RULE_BASED_TITLE: &str = "FP-Growth Based Suggestions";
pub const NO_RECOMMENDATIONS: &str = "No recommendations available.";

/// Builds a display block, one card per entry in input order
pub fn render_block(
    title: &str,
    items: &[RecommendedItem],
    resolver: &MetadataResolver,
) -> RecommendationBlock {
    let body = if items.is_empty() {
        BlockBody::NoRecommendations {
            message: NO_RECOMMENDATIONS.to_string(),
        }
    } else {
        BlockBody::Items {
            cards: items.iter().map(|entry| card(entry, resolver)).collect(),
        }
    };

    RecommendationBlock {
        title: title.to_string(),
        body,
    }
}

fn card(entry: &RecommendedItem, resolver: &MetadataResolver) -> ItemCard {
    let meta = resolver.resolve(&entry.item);

    ItemCard {
        name: meta.name,
        price: meta.price,
        category: meta.category,
        score: entry.score,
    }
}

// ============================================================================
// HTML rendering
// ============================================================================

pub fn card_html(card: &ItemCard) -> String {
    let mut html = format!("<div class='recommend-item'><strong>{}</strong>", escape_html(&card.name));

    if let Some(price) = card.price {
        let _ = write!(html, "<br><span class='item-price'>Price: ${:.2}</span>", price);
    }
    if let Some(category) = &card.category {
        let _ = write!(
            html,
            "<br><span class='item-cat'>Category: {}</span>",
            escape_html(category)
        );
    }
    if let Some(score) = card.score {
        let _ = write!(html, "<br><span class='item-rank'>Score: {:.4}</span>", score);
    }

    html.push_str("</div>");
    html
}

pub fn block_html(block: &RecommendationBlock) -> String {
    let mut html = format!(
        "<div class='recommend-box'><h3>{}</h3><div>",
        escape_html(&block.title)
    );

    match &block.body {
        BlockBody::Items { cards } => {
            for card in cards {
                html.push_str(&card_html(card));
            }
        }
        BlockBody::NoRecommendations { message } => {
            let _ = write!(html, "<em>{}</em>", escape_html(message));
        }
    }

    html.push_str("</div></div>");
    html
}

/// Full page with both blocks side by side and any source warnings above them
pub fn page_html(response: &RecommendationResponse) -> String {
    let mut html = String::from(
        "<!DOCTYPE html><html><head><meta charset='utf-8'>\
         <title>Hybrid Recommender System</title></head><body>\
         <h2>Hybrid Recommender System</h2>",
    );

    for warning in &response.warnings {
        let _ = write!(html, "<div class='error'>{}</div>", escape_html(&warning.message));
    }

    let _ = write!(
        html,
        "<div class='columns'>{}{}</div>",
        block_html(&response.collaborative),
        block_html(&response.rule_based)
    );

    html.push_str("</body></html>");
    html
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    escaped
}
