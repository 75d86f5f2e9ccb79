mod test_offset_basic;
