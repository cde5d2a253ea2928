// Handlers are split by access tier:
//   public - catalog reads, service info and health (no authentication)
//   admin  - catalog writes (bearer JWT with the administrator role)
pub mod admin;
pub mod extract;
pub mod public;
