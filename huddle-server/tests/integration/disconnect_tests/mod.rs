mod test_explicit_leave;
mod test_non_owner_disconnect;
