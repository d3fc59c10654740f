mod test_factory;
mod test_level;
