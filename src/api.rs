use crate::activities::{
    self,
    models::{Activity, ActivityKind, NewActivity},
};
use crate::analytics::{
    self,
    models::{
        Confidence, ConsistencyStats, LocationCluster, PacePrediction, PersonalRecords,
        RecordEntry, Summary, TrendPeriod, TrendPoint,
    },
};
use crate::config::AppConfig;
use crate::schedule::{
    self,
    models::{RecommendationResponse, RecommendedRun, RunType, WeeklyPlan},
};
use actix_cors::Cors;
use actix_governor::{Governor, GovernorConfigBuilder};
use actix_web::http::header;
use actix_web::middleware::{NormalizePath, TrailingSlash};
use actix_web::{middleware::Logger, web, App, HttpServer};
use sqlx::PgPool;
use tracing::info;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        activities::get_activities,
        activities::post_activities,
        analytics::get_summary,
        analytics::get_pace_trends,
        analytics::get_consistency,
        analytics::get_locations,
        analytics::get_records,
        analytics::get_prediction,
        schedule::get_schedule,
    ),
    components(schemas(
        Activity,
        ActivityKind,
        NewActivity,
        Summary,
        TrendPeriod,
        TrendPoint,
        ConsistencyStats,
        LocationCluster,
        RecordEntry,
        PersonalRecords,
        Confidence,
        PacePrediction,
        RunType,
        RecommendedRun,
        WeeklyPlan,
        RecommendationResponse,
    )),
    tags(
        (name = "Activities", description = "Activity snapshot and ingest endpoints"),
        (name = "Statistics", description = "Derived statistics over the activity history"),
        (name = "Schedule", description = "Training plan generation")
    )
)]
struct ApiDoc;

pub async fn run_api(db_pool: PgPool, config: AppConfig) -> std::io::Result<()> {
    info!("Starting server on {}...", config.bind_addr);

    let governor_conf = GovernorConfigBuilder::default()
        .seconds_per_request(2)
        .burst_size(20)
        .finish()
        .unwrap();

    let bind_addr = config.bind_addr.clone();

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(NormalizePath::new(TrailingSlash::Trim))
            .wrap(Cors::permissive())
            .wrap(
                actix_web::middleware::DefaultHeaders::new()
                    .add((
                        header::STRICT_TRANSPORT_SECURITY,
                        "max-age=63072000; includeSubDomains; preload",
                    ))
                    .add((header::X_CONTENT_TYPE_OPTIONS, "nosniff"))
                    .add((header::X_FRAME_OPTIONS, "DENY"))
                    .add((header::X_XSS_PROTECTION, "1; mode=block")),
            )
            .wrap(Governor::new(&governor_conf))
            .app_data(web::Data::new(db_pool.clone()))
            .app_data(web::Data::new(config.clone()))
            .service(activities::get_activities)
            .service(activities::post_activities)
            .service(analytics::get_summary)
            .service(analytics::get_pace_trends)
            .service(analytics::get_consistency)
            .service(analytics::get_locations)
            .service(analytics::get_records)
            .service(analytics::get_prediction)
            .service(schedule::get_schedule)
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", ApiDoc::openapi()),
            )
    })
    .bind(bind_addr.as_str())?
    .run()
    .await
}
