#![cfg(test)]

macro_rules! assert_query {
    ($actual:expr, $expected:expr) => {
        let actual = $crate::dql::ExpressionBuilder::to_dql(&$actual);
        assert_eq!(actual, $expected);
    };
}
