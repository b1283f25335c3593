//! Route handlers.

use actix_web::web;

pub mod account;
pub mod public;

/// Registers every application route.
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(account::my_account)
        .service(account::my_balance)
        .service(account::my_loans)
        .service(account::my_cards)
        .service(public::notices)
        .service(public::contact);
}
