//! 演示数据
//!
//! 空库首次启动时写入一个演示生产者和一个演示回收者，便于客户端直接登录体验

use sqlx::AnyPool;
use tracing::info;

use greentech_shared::database::timestamp_now;

use crate::auth::hash_password;
use crate::error::Result;
use crate::models::{NewNotification, WasteType, notification_kinds};

/// 演示账号密码
pub const DEMO_PASSWORD: &str = "password";
pub const DEMO_PRODUCER_EMAIL: &str = "producer@test.com";
pub const DEMO_COLLECTOR_EMAIL: &str = "collector@test.com";

struct DemoItem {
    item_type: WasteType,
    title: &'static str,
    description: &'static str,
    weight_kg: f64,
    lat: f64,
    lng: f64,
    address: &'static str,
}

const DEMO_ITEMS: [DemoItem; 2] = [
    DemoItem {
        item_type: WasteType::Paper,
        title: "Papelão Limpo",
        description: "Caixas de mudança desmontadas",
        weight_kg: 5.0,
        lat: -23.5500,
        lng: -46.6300,
        address: "Rua das Flores, 123",
    },
    DemoItem {
        item_type: WasteType::Glass,
        title: "Garrafas de Vidro",
        description: "20 garrafas de cerveja",
        weight_kg: 8.0,
        lat: -23.5550,
        lng: -46.6350,
        address: "Av. Paulista, 1000",
    },
];

/// 写入演示数据
///
/// 已存在任何生产者时跳过；返回是否实际写入
pub async fn seed_demo_data(pool: &AnyPool, hash_cost: u32) -> Result<bool> {
    let producers: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM producers")
        .fetch_one(pool)
        .await?;
    if producers > 0 {
        return Ok(false);
    }

    let password_hash = hash_password(DEMO_PASSWORD, hash_cost)?;
    let now = timestamp_now();
    let mut tx = pool.begin().await?;

    let producer_id: i64 = sqlx::query_scalar(
        r#"
        INSERT INTO producers (email, password_hash, name, phone, points, weight_recycled, level)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING id
        "#,
    )
    .bind(DEMO_PRODUCER_EMAIL)
    .bind(password_hash.clone())
    .bind("João Doador")
    .bind("(11) 99999-9999")
    .bind(1250_i64)
    .bind(55.5_f64)
    .bind("Reciclador Consciente")
    .fetch_one(&mut *tx)
    .await?;

    let producer_notifications = [
        NewNotification::new(
            "Bem-vindo!",
            "Comece a reciclar hoje mesmo.",
            notification_kinds::SYSTEM,
        ),
        NewNotification::new("Dica", "Separe o lixo seco do úmido.", notification_kinds::TIP),
    ];
    for n in producer_notifications {
        sqlx::query(
            r#"
            INSERT INTO producer_notifications (producer_id, title, message, type, is_read, created_at)
            VALUES ($1, $2, $3, $4, 0, $5)
            "#,
        )
        .bind(producer_id)
        .bind(n.title)
        .bind(n.message)
        .bind(n.kind)
        .bind(now.clone())
        .execute(&mut *tx)
        .await?;
    }

    for item in &DEMO_ITEMS {
        sqlx::query(
            r#"
            INSERT INTO items
                (producer_id, type, title, description, weight_kg, status, lat, lng, address, created_at)
            VALUES ($1, $2, $3, $4, $5, 'available', $6, $7, $8, $9)
            "#,
        )
        .bind(producer_id)
        .bind(item.item_type.as_str())
        .bind(item.title)
        .bind(item.description)
        .bind(item.weight_kg)
        .bind(item.lat)
        .bind(item.lng)
        .bind(item.address)
        .bind(now.clone())
        .execute(&mut *tx)
        .await?;
    }

    let collector_id: i64 = sqlx::query_scalar(
        r#"
        INSERT INTO collectors (email, password_hash, name, phone, earnings, collections_count, vehicle_type)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING id
        "#,
    )
    .bind(DEMO_COLLECTOR_EMAIL)
    .bind(password_hash)
    .bind("Maria Coletora")
    .bind("(11) 98888-8888")
    .bind(350.0_f64)
    .bind(12_i64)
    .bind("carroca")
    .fetch_one(&mut *tx)
    .await?;

    let alert = NewNotification::new(
        "Nova Coleta Próxima",
        "Há 5kg de papelão a 500m de você.",
        notification_kinds::ALERT,
    );
    sqlx::query(
        r#"
        INSERT INTO collector_notifications (collector_id, title, message, type, is_read, created_at)
        VALUES ($1, $2, $3, $4, 0, $5)
        "#,
    )
    .bind(collector_id)
    .bind(alert.title)
    .bind(alert.message)
    .bind(alert.kind)
    .bind(now)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    info!(producer_id, collector_id, "Demo data seeded");
    Ok(true)
}
