use argon2::{
    Argon2, PasswordHasher,
    password_hash::{SaltString, rand_core::OsRng},
};
use brew_bloom_api::{
    config::AppConfig,
    db::{create_orm_conn, create_pool, run_migrations},
};
use rust_decimal::Decimal;
use uuid::Uuid;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let pool = create_pool(&config.database_url).await?;
    // Ensure migrations are applied.
    let orm = create_orm_conn(&config.database_url).await?;
    run_migrations(&orm).await?;

    let admin_id = ensure_admin(&pool, "admin@brewbloom.example", "brewbloom-admin").await?;
    seed_menu(&pool).await?;

    println!("Seed completed. Admin ID: {admin_id}");
    Ok(())
}

async fn ensure_admin(pool: &sqlx::PgPool, email: &str, password: &str) -> anyhow::Result<Uuid> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!(e.to_string()))?
        .to_string();

    // An existing account keeps its password but is promoted to admin.
    let (user_id,): (Uuid,) = sqlx::query_as(
        r#"
        INSERT INTO users (id, email, password_hash, role)
        VALUES ($1, $2, $3, 'admin')
        ON CONFLICT (email) DO UPDATE SET role = EXCLUDED.role
        RETURNING id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(email)
    .bind(password_hash)
    .fetch_one(pool)
    .await?;

    println!("Ensured admin {email}");
    Ok(user_id)
}

async fn seed_menu(pool: &sqlx::PgPool) -> anyhow::Result<()> {
    // price in cents, converted below
    let coffees = vec![
        (
            "Velvet Espresso",
            450,
            "Ethiopian Yirgacheffe",
            "Bold & Syrupy",
            "Dark chocolate, caramel, hint of citrus",
            "https://images.unsplash.com/photo-1510591509098-f4fdc6d0ff04?w=600&h=600&fit=crop",
        ),
        (
            "Honeycomb Latte",
            500,
            "Costa Rican Tarrazú",
            "Silky & Balanced",
            "Honey drizzle, steamed oat milk, vanilla foam",
            "https://images.unsplash.com/photo-1572442388796-11668a67e53d?w=600&h=600&fit=crop",
        ),
        (
            "Cocoa Cold Brew",
            550,
            "Colombian Supremo",
            "Chilled & Smooth",
            "24-hour steep, cacao nibs, orange zest",
            "https://images.unsplash.com/photo-1517487881594-2787fef5ebf7?w=600&h=600&fit=crop",
        ),
        (
            "Cascara Tonic",
            425,
            "Guatemalan Antigua",
            "Sparkling & Bright",
            "Cascara syrup, tonic water, grapefruit peel",
            "https://images.unsplash.com/photo-1517487881594-2787fef5ebf7?w=600&h=600&fit=crop",
        ),
        (
            "Maple Cardamom Cappuccino",
            525,
            "Brazilian Cerrado",
            "Creamy & Comforting",
            "Microfoam, toasted cardamom, maple sugar",
            "https://images.unsplash.com/photo-1572442388796-11668a67e53d?w=600&h=600&fit=crop",
        ),
        (
            "Nitro Midnight Mocha",
            575,
            "Sumatran Mandheling",
            "Velvety & Indulgent",
            "Nitro pour, dark cocoa, smoked sea salt",
            "https://images.unsplash.com/photo-1510591509098-f4fdc6d0ff04?w=600&h=600&fit=crop",
        ),
    ];

    for (name, cents, origin, strength, notes, image_url) in coffees {
        sqlx::query(
            r#"
            INSERT INTO menu_items (id, name, price, origin, strength, notes, image_url)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (name) DO NOTHING
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(Decimal::new(cents, 2))
        .bind(origin)
        .bind(strength)
        .bind(notes)
        .bind(image_url)
        .execute(pool)
        .await?;
    }

    println!("Seeded menu");
    Ok(())
}
