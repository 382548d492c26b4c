use super::test_helpers::*;
use crate::error::{CarverError, Error};
