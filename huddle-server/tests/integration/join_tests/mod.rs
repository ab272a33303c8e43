mod test_join_protocol;
mod test_room_capacity;
