mod datatypes;
mod temporal_conversions;

mod test_util;
