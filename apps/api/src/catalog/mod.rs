// Catalog: sessions, attendance, materials, certificates, projects, agenda and the dashboard.

pub mod handlers;
pub mod services;
