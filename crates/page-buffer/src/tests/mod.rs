mod relocation_tests;
