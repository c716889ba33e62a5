pub mod models;
pub mod utils;

use actix_web::{get, web, HttpResponse, Responder};
use chrono::Local;
use serde::Deserialize;
use sqlx::PgPool;
use tracing::error;
use utoipa::IntoParams;
use validator::Validate;

use crate::activities::utils::fetch_activities;
use models::{
    ConsistencyStats, LocationCluster, PacePrediction, PersonalRecords, Summary, TrendPeriod,
    TrendPoint,
};

const DEFAULT_LOOKBACK_DAYS: i64 = 30;

#[derive(Debug, Deserialize, IntoParams)]
pub struct SummaryQuery {
    /// Restrict the summary to the last N days.
    pub lookback_days: Option<i64>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct TrendQuery {
    pub period: TrendPeriod,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct ConsistencyQuery {
    pub lookback_days: Option<i64>,
    pub include_events: Option<bool>,
}

#[derive(Debug, Deserialize, Validate, IntoParams)]
pub struct LocationsQuery {
    /// Coordinate rounding precision in decimal places.
    #[validate(range(min = 0, max = 8))]
    pub precision: Option<u32>,
}

#[utoipa::path(
    get,
    path = "/stats/summary",
    params(SummaryQuery),
    responses(
        (status = 200, description = "Aggregate statistics over the activity history", body = Summary)
    )
)]
#[get("/stats/summary")]
pub async fn get_summary(db: web::Data<PgPool>, query: web::Query<SummaryQuery>) -> impl Responder {
    match fetch_activities(db.get_ref()).await {
        Ok(activities) => {
            let summary = utils::summarize(
                &activities,
                query.lookback_days,
                Local::now().naive_local(),
            );
            HttpResponse::Ok().json(summary)
        }
        Err(e) => {
            error!("Error fetching activities: {}", e);
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[utoipa::path(
    get,
    path = "/stats/trends",
    params(TrendQuery),
    responses(
        (status = 200, description = "Average pace per calendar period, ascending", body = [TrendPoint])
    )
)]
#[get("/stats/trends")]
pub async fn get_pace_trends(db: web::Data<PgPool>, query: web::Query<TrendQuery>) -> impl Responder {
    match fetch_activities(db.get_ref()).await {
        Ok(activities) => {
            let trend = utils::pace_trend(&activities, query.period);
            HttpResponse::Ok().json(trend)
        }
        Err(e) => {
            error!("Error fetching activities: {}", e);
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[utoipa::path(
    get,
    path = "/stats/consistency",
    params(ConsistencyQuery),
    responses(
        (status = 200, description = "Streaks and training frequency", body = ConsistencyStats)
    )
)]
#[get("/stats/consistency")]
pub async fn get_consistency(
    db: web::Data<PgPool>,
    query: web::Query<ConsistencyQuery>,
) -> impl Responder {
    let lookback_days = query.lookback_days.unwrap_or(DEFAULT_LOOKBACK_DAYS);
    let include_events = query.include_events.unwrap_or(true);

    match fetch_activities(db.get_ref()).await {
        Ok(activities) => {
            let stats = utils::consistency(
                &activities,
                include_events,
                lookback_days,
                Local::now().date_naive(),
            );
            HttpResponse::Ok().json(stats)
        }
        Err(e) => {
            error!("Error fetching activities: {}", e);
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[utoipa::path(
    get,
    path = "/stats/locations",
    params(LocationsQuery),
    responses(
        (status = 200, description = "Activity clusters by rounded start coordinates", body = [LocationCluster]),
        (status = 400, description = "Precision out of range")
    )
)]
#[get("/stats/locations")]
pub async fn get_locations(
    db: web::Data<PgPool>,
    query: web::Query<LocationsQuery>,
) -> impl Responder {
    if let Err(e) = query.validate() {
        return HttpResponse::BadRequest().body(e.to_string());
    }

    let precision = query.precision.unwrap_or(utils::DEFAULT_CLUSTER_PRECISION);

    match fetch_activities(db.get_ref()).await {
        Ok(activities) => {
            let clusters = utils::cluster_by_location(&activities, precision);
            HttpResponse::Ok().json(clusters)
        }
        Err(e) => {
            error!("Error fetching activities: {}", e);
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[utoipa::path(
    get,
    path = "/stats/records",
    responses(
        (status = 200, description = "Personal records over the full history", body = PersonalRecords)
    )
)]
#[get("/stats/records")]
pub async fn get_records(db: web::Data<PgPool>) -> impl Responder {
    match fetch_activities(db.get_ref()).await {
        Ok(activities) => HttpResponse::Ok().json(utils::personal_records(&activities)),
        Err(e) => {
            error!("Error fetching activities: {}", e);
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[utoipa::path(
    get,
    path = "/stats/prediction",
    responses(
        (status = 200, description = "Estimated 5k time from recent efforts", body = PacePrediction),
        (status = 204, description = "Not enough qualifying history to predict")
    )
)]
#[get("/stats/prediction")]
pub async fn get_prediction(db: web::Data<PgPool>) -> impl Responder {
    match fetch_activities(db.get_ref()).await {
        Ok(activities) => match utils::predict_5k(&activities) {
            Some(prediction) => HttpResponse::Ok().json(prediction),
            None => HttpResponse::NoContent().finish(),
        },
        Err(e) => {
            error!("Error fetching activities: {}", e);
            HttpResponse::InternalServerError().finish()
        }
    }
}
