use jewelry_store_api::{
    config::AppConfig,
    db::{create_orm_conn, run_migrations},
    entity::{
        categories::{self, ActiveModel as CategoryActive, Entity as Categories},
        extras::{ActiveModel as ExtraActive, Entity as Extras, ExtraCategoryType},
        products::ActiveModel as ProductActive,
        variants::ActiveModel as VariantActive,
    },
    money::normalize_price,
    services::auth_service::ensure_default_admin,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    Set,
};

struct SeedProduct {
    name: &'static str,
    description: &'static str,
    image_url: &'static str,
    featured_rank: Option<i32>,
    variants: &'static [(&'static str, &'static str)],
}

const CATALOG: &[(&str, &[SeedProduct])] = &[
    (
        "Anillos",
        &[
            SeedProduct {
                name: "Anillo Solitario",
                description: "Plata 925 con circonia central",
                image_url: "/uploads/demo-solitario.jpg",
                featured_rank: Some(1),
                variants: &[("Talla 6", "500.00"), ("Talla 7", "500.00"), ("Talla 8", "520.00")],
            },
            SeedProduct {
                name: "Anillo Infinito",
                description: "Banda delgada con motivo infinito",
                image_url: "/uploads/demo-infinito.jpg",
                featured_rank: None,
                variants: &[("Talla 6", "380.00"), ("Talla 7", "380.00")],
            },
        ],
    ),
    (
        "Collares",
        &[SeedProduct {
            name: "Collar Corazón",
            description: "Dije de corazón sobre cadena veneciana",
            image_url: "/uploads/demo-corazon.jpg",
            featured_rank: Some(2),
            variants: &[("40 cm", "650.00"), ("45 cm", "690.00")],
        }],
    ),
    (
        "Aretes",
        &[SeedProduct {
            name: "Arracadas Clásicas",
            description: "Arracadas lisas de 2 cm",
            image_url: "",
            featured_rank: None,
            variants: &[("Plata", "290.00"), ("Chapa de oro", "340.00")],
        }],
    ),
];

const EXTRAS: &[(&str, &str, ExtraCategoryType)] = &[
    ("Grabado láser", "150.00", ExtraCategoryType::Servicio),
    ("Dije inicial", "120.00", ExtraCategoryType::Dije),
    ("Cadena rolo 45 cm", "210.00", ExtraCategoryType::Cadena),
    ("Caja de regalo", "60.00", ExtraCategoryType::General),
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let orm = create_orm_conn(&config.database_url).await?;
    // Ensure migrations are applied.
    run_migrations(&orm).await?;

    ensure_default_admin(&orm, &config).await?;
    seed_catalog(&orm).await?;
    seed_extras(&orm).await?;

    println!("Seed completed. Admin user: {}", config.admin_username);
    Ok(())
}

async fn seed_catalog(orm: &DatabaseConnection) -> anyhow::Result<()> {
    for (category_name, products) in CATALOG {
        let exists = Categories::find()
            .filter(categories::Column::Name.eq(*category_name))
            .one(orm)
            .await?;
        if exists.is_some() {
            println!("Category {category_name} already present, skipping");
            continue;
        }

        let category = CategoryActive {
            name: Set(category_name.to_string()),
            is_active: Set(true),
            ..Default::default()
        }
        .insert(orm)
        .await?;

        for seed in products.iter() {
            let product = ProductActive {
                category_id: Set(category.id),
                name: Set(seed.name.to_string()),
                description: Set(Some(seed.description.to_string())),
                image_url: Set(Some(seed.image_url.to_string()).filter(|u| !u.is_empty())),
                is_featured: Set(seed.featured_rank.is_some()),
                featured_rank: Set(seed.featured_rank.unwrap_or(0)),
                is_active: Set(true),
                ..Default::default()
            }
            .insert(orm)
            .await?;

            for (variant_name, price) in seed.variants {
                VariantActive {
                    product_id: Set(product.id),
                    name: Set(variant_name.to_string()),
                    price: Set(canonical(price)?),
                    is_active: Set(true),
                    ..Default::default()
                }
                .insert(orm)
                .await?;
            }
        }
        println!("Seeded category {category_name}");
    }
    Ok(())
}

async fn seed_extras(orm: &DatabaseConnection) -> anyhow::Result<()> {
    if Extras::find().count(orm).await? > 0 {
        println!("Extras already present, skipping");
        return Ok(());
    }

    for (name, price, kind) in EXTRAS {
        ExtraActive {
            name: Set(name.to_string()),
            price: Set(canonical(price)?),
            category_type: Set(*kind),
            is_active: Set(true),
            ..Default::default()
        }
        .insert(orm)
        .await?;
    }
    println!("Seeded extras");
    Ok(())
}

fn canonical(price: &str) -> anyhow::Result<String> {
    normalize_price(price).ok_or_else(|| anyhow::anyhow!("bad seed price {price}"))
}
