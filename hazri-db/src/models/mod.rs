pub mod attendance;
pub mod enrollment;
pub mod goal;
pub mod institute;
pub mod subject;
pub mod warning;
