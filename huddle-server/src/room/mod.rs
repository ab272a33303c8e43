mod occupancy;

pub use occupancy::{JoinOutcome, OccupancyTable, RoomOccupancy};
