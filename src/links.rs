use log::debug;
use regex::{Captures, Regex};
use std::sync::LazyLock;
use url::form_urlencoded;

/// Matches `**[Product Name]**` markers the model is asked to use for products
static PRODUCT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*\[(.*?)\]\*\*").expect("Invalid product marker regex"));

const SEARCH_URL: &str = "https://www.amazon.com/s";

/// Rewrite every `**[Product]**` marker into a Markdown search link carrying the affiliate tag
pub fn insert_affiliate_links(text: &str, tag: &str) -> String {
    let rewritten = PRODUCT_REGEX.replace_all(text, |caps: &Captures| {
        let product = &caps[1];
        debug!("Linking product '{}'", product);
        format!("[{}]({})", product, search_url(product, tag))
    });
    rewritten.into_owned()
}

/// Search URL for a product; spaces are encoded as `+`, the tag is inserted verbatim
fn search_url(product: &str, tag: &str) -> String {
    let query: String = form_urlencoded::byte_serialize(product.as_bytes()).collect();
    format!("{SEARCH_URL}?k={query}&tag={tag}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_product() {
        let result = insert_affiliate_links("Use **[Almond Flour]**.", "tag123");
        assert_eq!(
            result,
            "Use [Almond Flour](https://www.amazon.com/s?k=Almond+Flour&tag=tag123)."
        );
    }

    #[test]
    fn test_multiple_products() {
        let text = "- 1 cup **[Coconut Sugar]**\n- 2 tbsp **[Flax Seed]** meal";
        let result = insert_affiliate_links(text, "chef-20");
        assert!(result.contains("[Coconut Sugar](https://www.amazon.com/s?k=Coconut+Sugar&tag=chef-20)"));
        assert!(result.contains("[Flax Seed](https://www.amazon.com/s?k=Flax+Seed&tag=chef-20) meal"));
    }

    #[test]
    fn test_text_without_markers_is_unchanged() {
        let text = "Mix **well** and add [salt] to taste. *[pepper]*";
        assert_eq!(insert_affiliate_links(text, "tag123"), text);
    }

    #[test]
    fn test_special_characters_are_encoded() {
        let result = insert_affiliate_links("**[Salt & Pepper]**", "t");
        assert_eq!(
            result,
            "[Salt & Pepper](https://www.amazon.com/s?k=Salt+%26+Pepper&tag=t)"
        );
    }

    #[test]
    fn test_tag_is_inserted_verbatim() {
        let result = insert_affiliate_links("**[Rye Flour]**", "chef+1");
        assert_eq!(
            result,
            "[Rye Flour](https://www.amazon.com/s?k=Rye+Flour&tag=chef+1)"
        );
    }

    #[test]
    fn test_markers_do_not_span_each_other() {
        let result = insert_affiliate_links("**[Oats]** and **[Honey]**", "t");
        assert_eq!(
            result,
            "[Oats](https://www.amazon.com/s?k=Oats&tag=t) and [Honey](https://www.amazon.com/s?k=Honey&tag=t)"
        );
    }
}
