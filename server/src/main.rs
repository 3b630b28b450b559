use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use anyhow::{Context, Result};
use tracing::info;

use server::handlers::{deals, health, milestones, offers};
use server::{config, db, telemetry};

#[actix_web::main]
async fn main() -> Result<()> {
    telemetry::init_telemetry()?;

    let database_url = config::get_database_url();
    let pool = db::create_pool(&database_url).context("Failed to initialize database pool")?;
    db::init_schema(&pool).context("Failed to initialize database schema")?;

    let bind_addr = config::get_bind_addr();
    info!("PACT server listening on {}", bind_addr);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(Cors::permissive())
            .app_data(web::Data::new(pool.clone()))
            .service(health::health)
            // Offers
            .service(offers::create_offer)
            .service(offers::get_offer)
            .service(offers::offer_status)
            .service(offers::counter_offer)
            .service(offers::accept_offer)
            .service(offers::reject_offer)
            .service(offers::review_offer)
            .service(offers::view_offer)
            // Deals
            .service(deals::get_deal)
            .service(deals::deal_summary)
            .service(deals::release_first_half)
            .service(deals::release_final)
            .service(deals::submit_proof)
            .service(deals::review_proof)
            .service(deals::final_posted)
            .service(deals::complete_deal)
            .service(deals::request_cancellation)
            .service(deals::confirm_cancellation)
            .service(deals::withdraw_cancellation)
            // Milestones
            .service(milestones::create_milestone)
            .service(milestones::edit_milestone)
            .service(milestones::delete_milestone)
            .service(milestones::fund_milestone)
            .service(milestones::submit_milestone_work)
            .service(milestones::review_milestone)
    })
    .bind(&bind_addr)
    .context("Failed to bind HTTP server")?
    .run()
    .await
    .context("HTTP server terminated with an error")
}
