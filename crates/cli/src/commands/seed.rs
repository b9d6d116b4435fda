//! Seed the database with demo data.
//!
//! Inserts a demo admin, a demo customer, the five grocery categories and a
//! small catalog with per-variant prices and stock. Idempotent: re-running
//! skips rows that already exist.

use secrecy::SecretString;
use sqlx::PgPool;

use greengrocer_admin::db::create_pool;
use greengrocer_admin::services::auth::hash_password;

/// One seed product: name, description, image, category, variants.
struct SeedProduct {
    name: &'static str,
    description: &'static str,
    image_url: &'static str,
    category: &'static str,
    variants: &'static [(&'static str, i32, i32)],
}

const CATEGORIES: [&str; 5] = ["Vegetables", "Fruits", "Grains & Pulses", "Dairy", "Spices"];

const PRODUCTS: [SeedProduct; 4] = [
    SeedProduct {
        name: "Fresh Tomatoes",
        description: "Farm fresh red tomatoes, rich in vitamins",
        image_url: "https://images.example.com/tomatoes.jpg",
        category: "Vegetables",
        variants: &[("500g", 30, 100), ("1kg", 55, 80), ("2kg", 100, 50)],
    },
    SeedProduct {
        name: "Green Spinach",
        description: "Organic fresh spinach leaves, iron-rich",
        image_url: "https://images.example.com/spinach.jpg",
        category: "Vegetables",
        variants: &[("250g", 25, 60), ("500g", 45, 40)],
    },
    SeedProduct {
        name: "Alphonso Mangoes",
        description: "Sweet seasonal Alphonso mangoes",
        image_url: "https://images.example.com/mangoes.jpg",
        category: "Fruits",
        variants: &[("1kg", 350, 30), ("2kg", 650, 20)],
    },
    SeedProduct {
        name: "Basmati Rice",
        description: "Long grain aged basmati rice",
        image_url: "https://images.example.com/rice.jpg",
        category: "Grains & Pulses",
        variants: &[("1kg", 120, 90), ("5kg", 550, 40)],
    },
];

/// Run the seeding routine.
///
/// # Errors
///
/// Returns an error if the environment is missing a database URL or any
/// insert fails.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("DATABASE_URL")
        .or_else(|_| std::env::var("STOREFRONT_DATABASE_URL"))
        .map(SecretString::from)
        .map_err(|_| "DATABASE_URL is not set")?;

    let pool = create_pool(&database_url).await?;

    seed_admin(&pool).await?;
    seed_customer(&pool).await?;
    seed_catalog(&pool).await?;

    tracing::info!("Seeding complete");
    Ok(())
}

async fn seed_admin(pool: &PgPool) -> Result<(), Box<dyn std::error::Error>> {
    let password_hash = hash_password("admin123")?;

    sqlx::query(
        r"
        INSERT INTO admin.admin_user (name, email, password_hash)
        VALUES ($1, $2, $3)
        ON CONFLICT (email) DO NOTHING
        ",
    )
    .bind("Admin")
    .bind("admin@greengrocer.com")
    .bind(&password_hash)
    .execute(pool)
    .await?;

    tracing::info!("seeded admin account admin@greengrocer.com");
    Ok(())
}

async fn seed_customer(pool: &PgPool) -> Result<(), Box<dyn std::error::Error>> {
    let password_hash = hash_password("user1234")?;

    sqlx::query(
        r"
        INSERT INTO shop.user (name, email, password_hash, phone, address)
        VALUES ($1, $2, $3, $4, $5)
        ON CONFLICT (email) DO NOTHING
        ",
    )
    .bind("Demo User")
    .bind("user@demo.com")
    .bind(&password_hash)
    .bind("9876543210")
    .bind("123, Demo Street, Chennai, Tamil Nadu - 600001")
    .execute(pool)
    .await?;

    tracing::info!("seeded customer account user@demo.com");
    Ok(())
}

async fn seed_catalog(pool: &PgPool) -> Result<(), Box<dyn std::error::Error>> {
    for name in CATEGORIES {
        sqlx::query("INSERT INTO shop.category (name) VALUES ($1) ON CONFLICT (name) DO NOTHING")
            .bind(name)
            .execute(pool)
            .await?;
    }

    for product in &PRODUCTS {
        let existing: Option<(i32,)> =
            sqlx::query_as("SELECT id FROM shop.product WHERE name = $1")
                .bind(product.name)
                .fetch_optional(pool)
                .await?;
        if existing.is_some() {
            continue;
        }

        let (product_id,): (i32,) = sqlx::query_as(
            r"
            INSERT INTO shop.product (name, description, image_url, category_id)
            VALUES ($1, $2, $3, (SELECT id FROM shop.category WHERE name = $4))
            RETURNING id
            ",
        )
        .bind(product.name)
        .bind(product.description)
        .bind(product.image_url)
        .bind(product.category)
        .fetch_one(pool)
        .await?;

        for &(weight, price, stock) in product.variants {
            sqlx::query(
                r"
                INSERT INTO shop.product_variant (product_id, weight, price, stock)
                VALUES ($1, $2, $3, $4)
                ",
            )
            .bind(product_id)
            .bind(weight)
            .bind(price)
            .bind(stock)
            .execute(pool)
            .await?;
        }
    }

    tracing::info!("seeded catalog");
    Ok(())
}
