use once_cell::sync::Lazy;
use serde_json::json;

// Shared test context. Expects a running server (and its Postgres/Redis)
// plus the bootstrap admin credentials in the environment.
struct TestContext {
    client: reqwest::Client,
    base_url: String,
}

static ADMIN_EMAIL: Lazy<String> =
    Lazy::new(|| std::env::var("ADMIN_EMAIL").unwrap_or_else(|_| "admin@boutique.dz".to_string()));
static ADMIN_PASSWORD: Lazy<String> =
    Lazy::new(|| std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "changemeplease".to_string()));

static REDIS_CLIENT: Lazy<redis::Client> = Lazy::new(|| {
    redis::Client::open(
        std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://127.0.0.1:6379/".to_string()),
    )
    .unwrap()
});

impl TestContext {
    fn new() -> Self {
        Self {
            client: reqwest::Client::builder()
                .cookie_store(true)
                .build()
                .unwrap(),
            base_url: std::env::var("TEST_BASE_URL")
                .unwrap_or_else(|_| "http://127.0.0.1:3000".to_string()),
        }
    }

    /// Logs in as the bootstrap admin and returns the CSRF token.
    async fn login(&self) -> String {
        let response = self
            .client
            .post(format!("{}/api/admin/login", self.base_url))
            .json(&json!({
                "email": ADMIN_EMAIL.as_str(),
                "password": ADMIN_PASSWORD.as_str()
            }))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status().as_u16(), 200, "Admin login failed");

        let cookies = response.cookies().collect::<Vec<_>>();
        cookies
            .iter()
            .find(|c| c.name() == "csrf_token")
            .expect("CSRF token not found in login response")
            .value()
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[tokio::test]
    async fn test_public_catalog_and_zones() {
        let context = TestContext::new();

        let products = context
            .client
            .get(format!("{}/api/products", context.base_url))
            .send()
            .await
            .unwrap();
        assert_eq!(products.status().as_u16(), 200);
        let body: Value = products.json().await.unwrap();
        assert!(body.is_array(), "Product listing must be an array");

        let zones = context
            .client
            .get(format!("{}/api/zones", context.base_url))
            .send()
            .await
            .unwrap();
        assert_eq!(zones.status().as_u16(), 200);
        let zones: Value = zones.json().await.unwrap();
        let zones = zones.as_array().unwrap();
        assert_eq!(zones.len(), 58, "All 58 wilayas must be seeded");

        let alger = zones
            .iter()
            .find(|z| z["code"] == "16")
            .expect("Wilaya 16 missing");
        assert_eq!(alger["name"], "Alger");
    }

    #[tokio::test]
    async fn test_empty_cart_is_rejected() {
        let context = TestContext::new();

        let zones: Value = context
            .client
            .get(format!("{}/api/zones", context.base_url))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        let zone_id = zones[0]["id"].as_str().unwrap();

        let response = context
            .client
            .post(format!("{}/api/orders", context.base_url))
            .json(&json!({
                "customer_name": "Amine",
                "customer_phone": "0550123456",
                "zone_id": zone_id,
                "items": []
            }))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status().as_u16(), 400);
    }

    #[tokio::test]
    async fn test_unknown_zone_is_rejected() {
        let context = TestContext::new();

        let response = context
            .client
            .post(format!("{}/api/orders", context.base_url))
            .json(&json!({
                "customer_name": "Amine",
                "customer_phone": "0550123456",
                "zone_id": "00000000-0000-0000-0000-000000000000",
                "items": [{"product_id": "00000000-0000-0000-0000-000000000001", "quantity": 1}]
            }))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status().as_u16(), 400);
        let body: Value = response.json().await.unwrap();
        assert!(body["error"].as_str().unwrap().contains("delivery zone"));
    }

    #[tokio::test]
    async fn test_login_failures_are_uniform() {
        let context = TestContext::new();

        let unknown_email = context
            .client
            .post(format!("{}/api/admin/login", context.base_url))
            .json(&json!({
                "email": "nobody@boutique.dz",
                "password": "whatever123"
            }))
            .send()
            .await
            .unwrap();
        assert_eq!(unknown_email.status().as_u16(), 401);
        let unknown_body: Value = unknown_email.json().await.unwrap();

        let wrong_password = context
            .client
            .post(format!("{}/api/admin/login", context.base_url))
            .json(&json!({
                "email": ADMIN_EMAIL.as_str(),
                "password": "definitely-wrong"
            }))
            .send()
            .await
            .unwrap();
        assert_eq!(wrong_password.status().as_u16(), 401);
        let wrong_body: Value = wrong_password.json().await.unwrap();

        // No user-enumeration signal.
        assert_eq!(unknown_body["error"], wrong_body["error"]);
    }

    #[tokio::test]
    async fn test_admin_routes_require_session() {
        let context = TestContext::new();

        let response = context
            .client
            .get(format!("{}/api/admin/orders", context.base_url))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status().as_u16(), 403);
    }

    #[tokio::test]
    async fn test_full_order_flow_totals_and_status() {
        let context = TestContext::new();
        let csrf_token = context.login().await;

        // Two products: 1500 and 2500 DZD.
        let mut product_ids = Vec::new();
        for (name, price) in [("Tee Casbah", 1500i64), ("Tee Tassili", 2500i64)] {
            let response = context
                .client
                .post(format!("{}/api/admin/products", context.base_url))
                .header("X-CSRF-Token", &csrf_token)
                .json(&json!({
                    "name": name,
                    "price": price,
                    "image": "/uploads/placeholder.webp",
                    "category": "E2E"
                }))
                .send()
                .await
                .unwrap();
            assert_eq!(response.status().as_u16(), 201, "Product creation failed");
            let body: Value = response.json().await.unwrap();
            product_ids.push(body["id"].as_str().unwrap().to_string());
        }

        // Zone 16 - Alger, whatever its current fee is.
        let zones: Value = context
            .client
            .get(format!("{}/api/zones", context.base_url))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        let alger = zones
            .as_array()
            .unwrap()
            .iter()
            .find(|z| z["code"] == "16")
            .unwrap();
        let zone_id = alger["id"].as_str().unwrap();
        let fee = alger["delivery_fee"].as_i64().unwrap();

        // Quantities {2, 1}: subtotal 5500, total 5500 + fee.
        let response = context
            .client
            .post(format!("{}/api/orders", context.base_url))
            .json(&json!({
                "customer_name": "Lina K.",
                "customer_phone": "+213 550 12 34 56",
                "zone_id": zone_id,
                "address": "Rue Didouche Mourad, Alger",
                "items": [
                    {"product_id": product_ids[0], "quantity": 2},
                    {"product_id": product_ids[1], "quantity": 1}
                ]
            }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), 201, "Order placement failed");
        let order: Value = response.json().await.unwrap();

        assert_eq!(order["subtotal"].as_i64().unwrap(), 5500);
        assert_eq!(order["delivery_fee"].as_i64().unwrap(), fee);
        assert_eq!(order["total"].as_i64().unwrap(), 5500 + fee);
        assert_eq!(order["status"], "pending");
        let order_id = order["id"].as_str().unwrap();

        // An unknown status is rejected and the stored status unchanged.
        let bad_status = context
            .client
            .put(format!(
                "{}/api/admin/orders/{}/status",
                context.base_url, order_id
            ))
            .header("X-CSRF-Token", &csrf_token)
            .json(&json!({"status": "refunded"}))
            .send()
            .await
            .unwrap();
        assert_eq!(bad_status.status().as_u16(), 400);

        let detail: Value = context
            .client
            .get(format!("{}/api/admin/orders/{}", context.base_url, order_id))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(detail["status"], "pending");
        assert_eq!(detail["lines"].as_array().unwrap().len(), 2);

        // A valid transition works.
        let confirmed = context
            .client
            .put(format!(
                "{}/api/admin/orders/{}/status",
                context.base_url, order_id
            ))
            .header("X-CSRF-Token", &csrf_token)
            .json(&json!({"status": "confirmed"}))
            .send()
            .await
            .unwrap();
        assert_eq!(confirmed.status().as_u16(), 200);
        let confirmed: Value = confirmed.json().await.unwrap();
        assert_eq!(confirmed["status"], "confirmed");
    }

    #[tokio::test]
    async fn test_unknown_product_leaves_no_order_behind() {
        let context = TestContext::new();
        let csrf_token = context.login().await;

        // One real product so the cart is otherwise valid.
        let created: Value = context
            .client
            .post(format!("{}/api/admin/products", context.base_url))
            .header("X-CSRF-Token", &csrf_token)
            .json(&json!({
                "name": "Tee Atomique",
                "price": 1900,
                "image": "/uploads/atomique.webp"
            }))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        let real_product_id = created["id"].as_str().unwrap().to_string();

        let zones: Value = context
            .client
            .get(format!("{}/api/zones", context.base_url))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        let zone_id = zones[0]["id"].as_str().unwrap();

        let orders_before: Value = context
            .client
            .get(format!("{}/api/admin/orders", context.base_url))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        let count_before = orders_before.as_array().unwrap().len();

        // Valid zone, one real product, one that does not exist.
        let response = context
            .client
            .post(format!("{}/api/orders", context.base_url))
            .json(&json!({
                "customer_name": "Yacine",
                "customer_phone": "0660123456",
                "zone_id": zone_id,
                "items": [
                    {"product_id": real_product_id, "quantity": 1},
                    {"product_id": "00000000-0000-0000-0000-00000000dead", "quantity": 1}
                ]
            }))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status().as_u16(), 400);
        let body: Value = response.json().await.unwrap();
        assert!(body["error"].as_str().unwrap().contains("product"));

        // Neither the order nor any line survived the failure.
        let orders_after: Value = context
            .client
            .get(format!("{}/api/admin/orders", context.base_url))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(orders_after.as_array().unwrap().len(), count_before);
    }

    #[tokio::test]
    async fn test_csrf_token_lives_as_long_as_the_session() {
        let context = TestContext::new();
        let csrf_token = context.login().await;

        let mut con = REDIS_CLIENT.get_connection_manager().await.unwrap();
        let ttl: i64 = redis::cmd("TTL")
            .arg(format!("csrf:{}", csrf_token))
            .query_async(&mut con)
            .await
            .unwrap();

        // Anything at or under an hour would strand logged-in admins.
        assert!(
            ttl > 3600,
            "CSRF token TTL ({}) must match the session, not one hour",
            ttl
        );
    }

    #[tokio::test]
    async fn test_soft_delete_keeps_product_retrievable() {
        let context = TestContext::new();
        let csrf_token = context.login().await;

        let created: Value = context
            .client
            .post(format!("{}/api/admin/products", context.base_url))
            .header("X-CSRF-Token", &csrf_token)
            .json(&json!({
                "name": "Tee Ephemere",
                "price": 1800,
                "image": "/uploads/ephemere.webp"
            }))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        let product_id = created["id"].as_str().unwrap();

        let deleted = context
            .client
            .delete(format!(
                "{}/api/admin/products/{}",
                context.base_url, product_id
            ))
            .header("X-CSRF-Token", &csrf_token)
            .send()
            .await
            .unwrap();
        assert_eq!(deleted.status().as_u16(), 200);

        // Gone from the active listing...
        let listing: Value = context
            .client
            .get(format!("{}/api/products", context.base_url))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert!(listing
            .as_array()
            .unwrap()
            .iter()
            .all(|p| p["id"].as_str().unwrap() != product_id));

        // ...but still retrievable by id for order history.
        let by_id = context
            .client
            .get(format!("{}/api/products/{}", context.base_url, product_id))
            .send()
            .await
            .unwrap();
        assert_eq!(by_id.status().as_u16(), 200);
        let body: Value = by_id.json().await.unwrap();
        assert_eq!(body["is_active"], false);
    }

    #[tokio::test]
    async fn test_negative_fee_is_rejected() {
        let context = TestContext::new();
        let csrf_token = context.login().await;

        let zones: Value = context
            .client
            .get(format!("{}/api/zones", context.base_url))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        let zone = &zones.as_array().unwrap()[0];
        let zone_id = zone["id"].as_str().unwrap();
        let fee_before = zone["delivery_fee"].as_i64().unwrap();

        let response = context
            .client
            .put(format!("{}/api/admin/zones/{}/fee", context.base_url, zone_id))
            .header("X-CSRF-Token", &csrf_token)
            .json(&json!({"delivery_fee": -100}))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), 400);

        let zones_after: Value = context
            .client
            .get(format!("{}/api/zones", context.base_url))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        let zone_after = zones_after
            .as_array()
            .unwrap()
            .iter()
            .find(|z| z["id"].as_str().unwrap() == zone_id)
            .unwrap();
        assert_eq!(zone_after["delivery_fee"].as_i64().unwrap(), fee_before);
    }

    #[tokio::test]
    async fn test_category_delete_clears_labels() {
        let context = TestContext::new();
        let csrf_token = context.login().await;

        // A throwaway category carried by one product.
        let created: Value = context
            .client
            .post(format!("{}/api/admin/products", context.base_url))
            .header("X-CSRF-Token", &csrf_token)
            .json(&json!({
                "name": "Tee Categorised",
                "price": 2000,
                "image": "/uploads/categorised.webp",
                "category": "Edition Limitee"
            }))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        let product_id = created["id"].as_str().unwrap();

        let deleted = context
            .client
            .delete(format!(
                "{}/api/admin/categories/{}",
                context.base_url, "Edition%20Limitee"
            ))
            .header("X-CSRF-Token", &csrf_token)
            .send()
            .await
            .unwrap();
        assert_eq!(deleted.status().as_u16(), 200);

        // The label is gone from the product and from the listing.
        let product: Value = context
            .client
            .get(format!("{}/api/products/{}", context.base_url, product_id))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert!(product["category"].is_null());

        let categories: Value = context
            .client
            .get(format!("{}/api/admin/categories", context.base_url))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert!(categories
            .as_array()
            .unwrap()
            .iter()
            .all(|c| c != "Edition Limitee"));
    }
}
