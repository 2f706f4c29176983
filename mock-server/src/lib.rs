use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    pub tags: Vec<String>,
    pub in_stock: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Deserialize)]
pub struct CreateProduct {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default = "in_stock_default")]
    pub in_stock: bool,
}

fn in_stock_default() -> bool {
    true
}

#[derive(Deserialize)]
pub struct UpdateProduct {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
    pub in_stock: Option<bool>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Deserialize)]
pub struct CreateUser {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct UpdateUser {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// A user as stored; the password never leaves the server.
#[derive(Clone, Debug)]
struct StoredUser {
    user: User,
    password: String,
}

/// Records are kept in insertion order, which is the order `GET` lists them.
#[derive(Default)]
pub struct Store {
    products: Vec<Product>,
    users: Vec<StoredUser>,
}

impl Store {
    fn insert_product(&mut self, input: CreateProduct) -> Product {
        let product = Product {
            id: Uuid::new_v4(),
            name: input.name,
            description: input.description,
            price: input.price,
            category: input.category,
            tags: input.tags,
            in_stock: input.in_stock,
            created_at: Utc::now(),
        };
        self.products.push(product.clone());
        product
    }

    /// Whether `password` is the stored password for user `id`.
    pub fn password_matches(&self, id: Uuid, password: &str) -> bool {
        self.users
            .iter()
            .any(|stored| stored.user.id == id && stored.password == password)
    }
}

pub type Db = Arc<RwLock<Store>>;

type ApiError = (StatusCode, Json<Value>);

fn not_found(kind: &str) -> ApiError {
    (StatusCode::NOT_FOUND, Json(json!({ "detail": format!("{kind} not found") })))
}

pub fn sample_products() -> Vec<CreateProduct> {
    let sample = |name: &str, description: &str, price: f64, category: &str, tags: [&str; 3]| CreateProduct {
        name: name.to_string(),
        description: description.to_string(),
        price,
        category: category.to_string(),
        tags: tags.iter().map(|tag| tag.to_string()).collect(),
        in_stock: true,
    };
    vec![
        sample(
            "Wireless Headphones",
            "High-quality wireless headphones with noise cancellation",
            199.99,
            "Electronics",
            ["audio", "wireless", "premium"],
        ),
        sample(
            "Coffee Maker",
            "Programmable coffee maker with built-in grinder",
            89.99,
            "Appliances",
            ["kitchen", "coffee", "automatic"],
        ),
        sample(
            "Laptop Stand",
            "Adjustable aluminum laptop stand for ergonomic work",
            45.99,
            "Accessories",
            ["ergonomic", "aluminum", "adjustable"],
        ),
    ]
}

pub fn app() -> Router {
    router(Arc::new(RwLock::new(Store::default())))
}

pub fn app_with_sample_data() -> Router {
    let mut store = Store::default();
    for product in sample_products() {
        store.insert_product(product);
    }
    router(Arc::new(RwLock::new(store)))
}

pub fn router(db: Db) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/products", get(list_products).post(create_product))
        .route(
            "/products/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .route("/users", get(list_users).post(create_user))
        .route("/users/{id}", get(get_user).put(update_user).delete(delete_user))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn root() -> Json<Value> {
    Json(json!({ "message": "Welcome to the Product CRUD API" }))
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}

async fn list_products(State(db): State<Db>) -> Json<Vec<Product>> {
    Json(db.read().await.products.clone())
}

async fn create_product(State(db): State<Db>, Json(input): Json<CreateProduct>) -> Json<Product> {
    let product = db.write().await.insert_product(input);
    log::info!("created product {}", product.id);
    Json(product)
}

async fn get_product(State(db): State<Db>, Path(id): Path<Uuid>) -> Result<Json<Product>, ApiError> {
    let store = db.read().await;
    store
        .products
        .iter()
        .find(|product| product.id == id)
        .cloned()
        .map(Json)
        .ok_or_else(|| not_found("Product"))
}

async fn update_product(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateProduct>,
) -> Result<Json<Product>, ApiError> {
    let mut store = db.write().await;
    let product = store
        .products
        .iter_mut()
        .find(|product| product.id == id)
        .ok_or_else(|| not_found("Product"))?;
    if let Some(name) = input.name {
        product.name = name;
    }
    if let Some(description) = input.description {
        product.description = description;
    }
    if let Some(price) = input.price {
        product.price = price;
    }
    if let Some(category) = input.category {
        product.category = category;
    }
    if let Some(tags) = input.tags {
        product.tags = tags;
    }
    if let Some(in_stock) = input.in_stock {
        product.in_stock = in_stock;
    }
    Ok(Json(product.clone()))
}

async fn delete_product(State(db): State<Db>, Path(id): Path<Uuid>) -> Result<Json<Value>, ApiError> {
    let mut store = db.write().await;
    let index = store
        .products
        .iter()
        .position(|product| product.id == id)
        .ok_or_else(|| not_found("Product"))?;
    store.products.remove(index);
    Ok(Json(json!({ "message": "Product deleted successfully" })))
}

async fn list_users(State(db): State<Db>) -> Json<Vec<User>> {
    let store = db.read().await;
    Json(store.users.iter().map(|stored| stored.user.clone()).collect())
}

async fn create_user(State(db): State<Db>, Json(input): Json<CreateUser>) -> Json<User> {
    let user = User {
        id: Uuid::new_v4(),
        name: input.name,
        email: input.email,
        created_at: Utc::now(),
    };
    db.write().await.users.push(StoredUser {
        user: user.clone(),
        password: input.password,
    });
    log::info!("created user {}", user.id);
    Json(user)
}

async fn get_user(State(db): State<Db>, Path(id): Path<Uuid>) -> Result<Json<User>, ApiError> {
    let store = db.read().await;
    store
        .users
        .iter()
        .find(|stored| stored.user.id == id)
        .map(|stored| Json(stored.user.clone()))
        .ok_or_else(|| not_found("User"))
}

async fn update_user(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateUser>,
) -> Result<Json<User>, ApiError> {
    let mut store = db.write().await;
    let stored = store
        .users
        .iter_mut()
        .find(|stored| stored.user.id == id)
        .ok_or_else(|| not_found("User"))?;
    if let Some(name) = input.name {
        stored.user.name = name;
    }
    if let Some(email) = input.email {
        stored.user.email = email;
    }
    if let Some(password) = input.password {
        stored.password = password;
    }
    Ok(Json(stored.user.clone()))
}

async fn delete_user(State(db): State<Db>, Path(id): Path<Uuid>) -> Result<Json<Value>, ApiError> {
    let mut store = db.write().await;
    let index = store
        .users
        .iter()
        .position(|stored| stored.user.id == id)
        .ok_or_else(|| not_found("User"))?;
    store.users.remove(index);
    Ok(Json(json!({ "message": "User deleted successfully" })))
}
