pub mod models;
pub mod utils;

use actix_web::{get, post, web, HttpResponse, Responder};
use models::{Activity, NewActivity};
use sqlx::PgPool;
use tracing::{error, info};

#[utoipa::path(
    get,
    path = "/activities",
    responses(
        (status = 200, description = "List all activities, most recent first", body = [Activity])
    )
)]
#[get("/activities")]
pub async fn get_activities(db: web::Data<PgPool>) -> impl Responder {
    match utils::fetch_activities(db.get_ref()).await {
        Ok(activities) => HttpResponse::Ok().json(activities),
        Err(e) => {
            error!("Error fetching activities: {}", e);
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[utoipa::path(
    post,
    path = "/activities",
    request_body(content = Vec<NewActivity>, description = "New activities to insert", content_type = "application/json"),
    responses(
        (status = 201, description = "Activities created"),
        (status = 400, description = "Unparseable activity in payload")
    )
)]
#[post("/activities")]
pub async fn post_activities(
    db: web::Data<PgPool>,
    items: web::Json<Vec<NewActivity>>,
) -> impl Responder {
    let mut activities: Vec<Activity> = Vec::new();

    for item in items.into_inner() {
        match Activity::from_new(item) {
            Ok(activity) => activities.push(activity),
            Err(e) => return HttpResponse::BadRequest().body(e),
        }
    }

    match utils::insert_activities(db.get_ref(), &activities).await {
        Ok(inserted) => {
            info!("Inserted {} activities", inserted);
            HttpResponse::Created().finish()
        }
        Err(e) => {
            error!("Error inserting activities: {}", e);
            HttpResponse::InternalServerError().finish()
        }
    }
}
