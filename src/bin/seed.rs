//! Development seed tool. Wipes the content tables and loads a starter data
//! set plus a default admin account (admin / admin123).
//!
//! Run with: cargo run --bin seed

use sqlx::sqlite::SqlitePoolOptions;
use tracing_subscriber::EnvFilter;

use tour_portal::auth::hash_password;
use tour_portal::config::AppConfig;
use tour_portal::models::{
    BlogArticle, Category, CreateArticleRequest, CreateCategoryRequest,
    CreateCreditationRequest, CreateFaqRequest, CreatePackageRequest, Creditation, Faq,
    TravelPackage, UpdateSettingsRequest,
};
use tour_portal::repository::{CatalogResource, settings, users};

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::load();

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect(&config.db_url)
        .await
        .expect("FATAL: failed to connect to the database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("FATAL: database migration failed");

    tracing::info!("clearing existing data");
    for table in [
        "travel_packages",
        "blog_articles",
        "gallery_images",
        "faqs",
        "partners",
        "categories",
        "creditations",
        "cms_settings",
        "contact_submissions",
        "booking_inquiries",
    ] {
        sqlx::query(&format!("DELETE FROM {table}"))
            .execute(&pool)
            .await
            .expect("FATAL: failed to clear table");
    }
    users::delete_all(&pool).await.expect("FATAL: failed to clear accounts");

    let password_hash = hash_password("admin123").expect("FATAL: failed to hash seed password");
    users::create(&pool, "admin", "admin@savannatrails.example", &password_hash, "admin")
        .await
        .expect("FATAL: failed to create admin account");
    tracing::info!("created admin account (admin / admin123)");

    settings::upsert(
        &pool,
        UpdateSettingsRequest {
            company_name: Some("Savanna Trails Tours & Travel".into()),
            company_email: Some("info@savannatrails.example".into()),
            company_phone: Some("+256 700 000 000".into()),
            whatsapp_number: Some("+256 700 000 000".into()),
            about_content: Some(
                "Savanna Trails is a locally owned tour operator crafting wildlife, \
                 adventure and cultural journeys across East Africa."
                    .into(),
            ),
            ..Default::default()
        },
    )
    .await
    .expect("FATAL: failed to seed settings");

    let categories = [
        ("Wildlife Safaris", "wildlife"),
        ("Adventure", "adventure"),
        ("Cultural Tours", "cultural"),
        ("Day Trips", "day-trips"),
    ];
    for (name, slug) in categories {
        Category::insert(
            &pool,
            CreateCategoryRequest {
                name: Some(name.into()),
                slug: Some(slug.into()),
            },
        )
        .await
        .expect("FATAL: failed to seed category");
    }

    let packages = [
        (
            "Gorilla Trekking Adventure",
            "Track mountain gorillas through the misty slopes of Bwindi Impenetrable Forest with expert local guides.",
            "$1,500",
            "3 Days",
            "wildlife",
            "Includes park permits, transport, accommodation and meals. Moderate fitness required.",
        ),
        (
            "Murchison Falls Safari",
            "Game drives and a boat cruise to the base of the world's most powerful waterfall.",
            "$950",
            "4 Days",
            "wildlife",
            "Full-board safari lodge, morning and evening game drives, Nile boat cruise.",
        ),
        (
            "Nile White-Water Rafting",
            "A full day on grade-five rapids at the source of the Nile in Jinja.",
            "$140",
            "1 Day",
            "adventure",
            "All safety gear, river guides, riverside lunch and transfers from Kampala.",
        ),
        (
            "Batwa Cultural Experience",
            "Walk with Batwa elders and learn the forest traditions of one of Africa's oldest peoples.",
            "$320",
            "2 Days",
            "cultural",
            "Community-led visit, traditional meals, craft workshop, local homestay.",
        ),
    ];
    for (title, description, price, duration, category, details) in packages {
        TravelPackage::insert(
            &pool,
            CreatePackageRequest {
                title: Some(title.into()),
                description: Some(description.into()),
                price: Some(price.into()),
                duration: Some(duration.into()),
                category: Some(category.into()),
                details: Some(details.into()),
                image: None,
            },
        )
        .await
        .expect("FATAL: failed to seed package");
    }

    let articles = [
        (
            "When to See the Gorillas",
            "The dry seasons make for easier trekking, but every month has its rewards.",
            "Permits sell out months ahead in June-September. The rainy seasons bring \
             lush forest, fewer visitors and discounted lodge rates.",
            "Savanna Trails Team",
        ),
        (
            "Packing for an East African Safari",
            "Neutral colors, layers and a good pair of binoculars go a long way.",
            "Mornings on the savanna are cold, middays hot. Pack layers, sun \
             protection and soft-sided luggage for light aircraft transfers.",
            "Savanna Trails Team",
        ),
    ];
    for (title, excerpt, content, author) in articles {
        BlogArticle::insert(
            &pool,
            CreateArticleRequest {
                title: Some(title.into()),
                excerpt: Some(excerpt.into()),
                content: Some(content.into()),
                author: Some(author.into()),
                image: None,
            },
        )
        .await
        .expect("FATAL: failed to seed article");
    }

    let faqs = [
        (
            "Do I need a visa to visit Uganda?",
            "Most nationalities can apply online for an e-visa; allow at least five working days.",
        ),
        (
            "How fit do I need to be for gorilla trekking?",
            "Treks last one to six hours on steep forest trails. Porters are available and recommended.",
        ),
        (
            "What is your cancellation policy?",
            "Full refund up to 60 days before departure; park permits are non-refundable once issued.",
        ),
    ];
    for (question, answer) in faqs {
        Faq::insert(
            &pool,
            CreateFaqRequest {
                question: Some(question.into()),
                answer: Some(answer.into()),
            },
        )
        .await
        .expect("FATAL: failed to seed FAQ");
    }

    let creditations = [
        ("Uganda Tourism Board Licensed", "shield"),
        ("Association of Uganda Tour Operators", "award"),
        ("Eco Tourism Certified", "leaf"),
        ("Fully Bonded & Insured", "lock"),
    ];
    for (name, icon) in creditations {
        Creditation::insert(
            &pool,
            CreateCreditationRequest {
                name: Some(name.into()),
                icon: Some(icon.into()),
            },
        )
        .await
        .expect("FATAL: failed to seed creditation");
    }

    tracing::info!("seed complete");
}
