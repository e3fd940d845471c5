mod test_capture_resolves_after_teardown;
