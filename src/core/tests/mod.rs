mod binding_factory_tests;
