pub mod models;
pub mod utils;

use actix_web::{get, web, HttpResponse, Responder};
use chrono::{Duration, Local, NaiveDateTime, NaiveTime};
use sqlx::PgPool;
use tracing::error;
use validator::Validate;

use crate::activities::utils::fetch_activities_since;
use crate::config::AppConfig;
use models::{RecommendationResponse, ScheduleQuery};

#[utoipa::path(
    get,
    path = "/schedule",
    params(ScheduleQuery),
    responses(
        (status = 200, description = "Periodized multi-week training plan", body = RecommendationResponse),
        (status = 400, description = "Parameter out of documented range")
    )
)]
#[get("/schedule")]
pub async fn get_schedule(
    db: web::Data<PgPool>,
    config: web::Data<AppConfig>,
    query: web::Query<ScheduleQuery>,
) -> impl Responder {
    let query = query.into_inner();
    if let Err(e) = query.validate() {
        return HttpResponse::BadRequest().body(e.to_string());
    }

    let today = Local::now().date_naive();
    let since = NaiveDateTime::new(
        today - Duration::days(utils::HISTORY_DAYS),
        NaiveTime::MIN,
    );

    match fetch_activities_since(db.get_ref(), since).await {
        Ok(activities) => {
            match utils::generate_schedule(
                &activities,
                query.weeks_ahead,
                query.goal_weekly_km,
                &config.weekly_event,
                today,
            ) {
                Ok(response) => HttpResponse::Ok().json(response),
                Err(e) => HttpResponse::BadRequest().body(e.to_string()),
            }
        }
        Err(e) => {
            error!("Error fetching activities: {}", e);
            HttpResponse::InternalServerError().finish()
        }
    }
}
