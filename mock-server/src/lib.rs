use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Multipart, Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use bytes::Bytes;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub category: String,
    pub brand: String,
    pub price: f64,
    pub quantity: u32,
    pub release_date: NaiveDate,
    pub availability: bool,
}

/// The `product` part of a multipart submission. Ids are server-assigned and
/// never accepted from the client.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    pub name: String,
    pub description: String,
    pub category: String,
    pub brand: String,
    pub price: f64,
    pub quantity: u32,
    pub release_date: NaiveDate,
    pub availability: bool,
}

#[derive(Clone, Debug)]
struct StoredImage {
    content_type: String,
    bytes: Bytes,
}

#[derive(Clone, Debug)]
struct StoredProduct {
    product: Product,
    image: Option<StoredImage>,
}

type Db = Arc<RwLock<HashMap<Uuid, StoredProduct>>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(HashMap::new()));
    Router::new()
        .route("/api/products", get(list_products))
        .route("/api/products/search", get(search_products))
        .route("/api/products/{id}", get(get_product))
        .route("/api/product", post(create_product))
        .route("/api/product/{id}", put(update_product).delete(delete_product))
        .route("/api/product/{id}/image", get(get_image))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_products(State(db): State<Db>) -> Json<Vec<Product>> {
    let products = db.read().await;
    Json(products.values().map(|p| p.product.clone()).collect())
}

#[derive(Deserialize)]
struct SearchParams {
    query: String,
}

/// Case-insensitive substring match over name, description, brand and
/// category. An empty result is reported as 404, as the real backend does.
async fn search_products(
    State(db): State<Db>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<Product>>, StatusCode> {
    let needle = params.query.to_lowercase();
    let products = db.read().await;
    let matches: Vec<Product> = products
        .values()
        .map(|p| &p.product)
        .filter(|p| {
            p.name.to_lowercase().contains(&needle)
                || p.description.to_lowercase().contains(&needle)
                || p.brand.to_lowercase().contains(&needle)
                || p.category.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect();
    if matches.is_empty() {
        return Err(StatusCode::NOT_FOUND);
    }
    Ok(Json(matches))
}

async fn get_product(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
) -> Result<Json<Product>, StatusCode> {
    let products = db.read().await;
    products
        .get(&id)
        .map(|p| Json(p.product.clone()))
        .ok_or(StatusCode::NOT_FOUND)
}

async fn get_image(State(db): State<Db>, Path(id): Path<Uuid>) -> Result<Response, StatusCode> {
    let products = db.read().await;
    let stored = products.get(&id).ok_or(StatusCode::NOT_FOUND)?;
    let image = stored.image.as_ref().ok_or(StatusCode::NOT_FOUND)?;
    Ok((
        [(header::CONTENT_TYPE, image.content_type.clone())],
        image.bytes.clone(),
    )
        .into_response())
}

async fn create_product(
    State(db): State<Db>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<Product>), StatusCode> {
    let (input, image) = read_multipart(multipart).await?;
    let product = materialize(Uuid::new_v4(), input);
    db.write().await.insert(
        product.id,
        StoredProduct {
            product: product.clone(),
            image,
        },
    );
    Ok((StatusCode::CREATED, Json(product)))
}

async fn update_product(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> Result<Json<Product>, StatusCode> {
    let (input, image) = read_multipart(multipart).await?;
    let mut products = db.write().await;
    let stored = products.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    stored.product = materialize(id, input);
    // Without a new image the existing one is kept.
    if let Some(image) = image {
        stored.image = Some(image);
    }
    Ok(Json(stored.product.clone()))
}

async fn delete_product(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, StatusCode> {
    let mut products = db.write().await;
    products
        .remove(&id)
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or(StatusCode::NOT_FOUND)
}

fn materialize(id: Uuid, input: ProductInput) -> Product {
    Product {
        id,
        name: input.name,
        description: input.description,
        category: input.category,
        brand: input.brand,
        price: input.price,
        quantity: input.quantity,
        release_date: input.release_date,
        availability: input.availability,
    }
}

/// Pull the `product` JSON part and the optional `imageFile` part out of a
/// multipart submission. A missing or malformed `product` part is a 400.
async fn read_multipart(
    mut multipart: Multipart,
) -> Result<(ProductInput, Option<StoredImage>), StatusCode> {
    let mut input: Option<ProductInput> = None;
    let mut image: Option<StoredImage> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| StatusCode::BAD_REQUEST)?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("product") => {
                let bytes = field.bytes().await.map_err(|_| StatusCode::BAD_REQUEST)?;
                input =
                    Some(serde_json::from_slice(&bytes).map_err(|_| StatusCode::BAD_REQUEST)?);
            }
            Some("imageFile") => {
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes = field.bytes().await.map_err(|_| StatusCode::BAD_REQUEST)?;
                image = Some(StoredImage {
                    content_type,
                    bytes,
                });
            }
            _ => {}
        }
    }
    let input = input.ok_or(StatusCode::BAD_REQUEST)?;
    Ok((input, image))
}
