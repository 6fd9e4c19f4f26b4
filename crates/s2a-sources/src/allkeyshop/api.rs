//! AllKeyShop endpoints. The site has no public API; these are the pages and
//! the WordPress ajax action its own wishlist button uses.

pub fn product_page_url(base_url: &str, slug: &str) -> String {
    format!("{}/buy-{}-cd-key-compare-prices/", base_url, slug)
}

pub fn profile_wishlist_url(base_url: &str) -> String {
    format!("{}/profile/wishlist/", base_url)
}

pub fn add_game_url(base_url: &str, wishlist_id: u64, product_id: u64) -> String {
    format!(
        "{}/wp-admin/admin-ajax.php?action=akswl_add_game&id={}&normalisedName={}",
        base_url, wishlist_id, product_id
    )
}
