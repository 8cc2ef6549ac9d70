pub mod assignments;

pub mod courses;

pub mod lessons;

pub mod reviews;

pub mod submissions;

pub mod users;

#[cfg(test)]
mod tests;

pub use assignments::configure_assignments_routes;
pub use courses::configure_courses_routes;
pub use lessons::configure_lessons_routes;
pub use reviews::configure_reviews_routes;
pub use submissions::configure_submissions_routes;
pub use users::configure_user_routes;

use actix_web::web;

// 挂载全部 API 路由
pub fn configure_api_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(configure_user_routes)
        .configure(configure_courses_routes)
        .configure(configure_lessons_routes)
        .configure(configure_assignments_routes)
        .configure(configure_submissions_routes)
        .configure(configure_reviews_routes);
}
