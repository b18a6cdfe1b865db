//! 데이터베이스 저장소.
//!
//! sqlx 기반 PostgreSQL 저장소 모음입니다. 각 저장소는 상태 없는
//! 유닛 구조체이며 모든 연산이 `&PgPool`을 받습니다.

mod security;
mod user;

pub use security::{SecurityPage, SecurityRepository};
pub use user::UserRepository;
