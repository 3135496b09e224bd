mod common;

mod goldenfiles {
    use super::common;

    #[test]
    fn orders_over_time() {
        let result = common::test_translation("orders_over_time").unwrap();
        insta::assert_snapshot!(result);
    }

    #[test]
    fn revenue_by_status() {
        let result = common::test_translation("revenue_by_status").unwrap();
        insta::assert_snapshot!(result);
    }

    #[test]
    fn null_semantics() {
        let result = common::test_translation("null_semantics").unwrap();
        insta::assert_snapshot!(result);
    }

    #[test]
    fn active_users() {
        let result = common::test_translation("active_users").unwrap();
        insta::assert_snapshot!(result);
    }
}

mod queries {
    use super::common;
    use chart_query_configuration::{FilterSpec, FilterValue, JoinSpec, OrderSpec, Scalar};
    use query_engine_sql::sql::string::Param;
    use query_engine_translation::translation::{self, ChartQueryError, Error};
    use similar_asserts::assert_eq;
    use tests_common::goldenfiles::{load_golden_chart, GOLDEN_CHARTS};
    use tests_common::query::placeholders;

    #[test]
    fn minimal_chart_selects_from_one_table() {
        let mut chart = common::chart_with_filters(vec![]);
        let query = translation::to_sql(&mut chart).unwrap();

        assert_eq!(
            query.sql,
            "SELECT status as x_value, amount as y_value_0 FROM orders"
        );
        assert!(query.params.is_empty());
    }

    #[test]
    fn translation_is_deterministic() {
        for name in GOLDEN_CHARTS {
            let mut first = load_golden_chart(name).unwrap();
            let mut second = first.clone();
            assert_eq!(
                translation::to_sql(&mut first).unwrap(),
                translation::to_sql(&mut second).unwrap(),
                "{name}"
            );
        }
    }

    #[test]
    fn every_placeholder_has_a_parameter() {
        for name in GOLDEN_CHARTS {
            let mut chart = load_golden_chart(name).unwrap();
            let query = translation::to_sql(&mut chart).unwrap();
            let numbers = placeholders(&query.sql);

            let expected: Vec<usize> = (1..=query.params.len()).collect();
            assert_eq!(numbers, expected, "{name}");
        }
    }

    #[test]
    fn joins_of_later_tables_are_ignored() {
        let mut chart = load_golden_chart("active_users").unwrap();
        let query = translation::to_sql(&mut chart).unwrap();

        assert!(!query.sql.contains("audit_log"));
        assert!(!query.sql.contains("admins"));
        assert!(query
            .sql
            .contains(" INNER JOIN users ON sessions.user_id = users.id"));
    }

    #[test]
    fn join_aliases_follow_the_table() {
        let mut chart = common::chart_with_filters(vec![]);
        chart.tables[0].alias = Some("o".to_string());
        chart.tables[0].joins.push(JoinSpec {
            table: "users".to_string(),
            alias: Some("u".to_string()),
            join_type: "RIGHT".to_string(),
            condition: "o.user_id = u.id".to_string(),
        });

        let query = translation::to_sql(&mut chart).unwrap();
        assert_eq!(
            query.sql,
            "SELECT status as x_value, amount as y_value_0 FROM orders o RIGHT JOIN users u ON o.user_id = u.id"
        );
    }

    #[test]
    fn axis_aliases_do_not_rename_columns() {
        let mut chart = common::chart_with_filters(vec![]);
        chart.x_axis.alias = Some("state".to_string());
        chart.y_axis[0].alias = Some("total".to_string());
        chart.y_axis[0].aggregation = "AVG".to_string();

        let query = translation::to_sql(&mut chart).unwrap();
        assert_eq!(
            query.sql,
            "SELECT status as x_value, AVG(amount) as y_value_0 FROM orders"
        );
    }

    #[test]
    fn missing_directions_sort_ascending() {
        let mut chart = common::chart_with_filters(vec![]);
        chart.order_by.push(OrderSpec {
            column: "status".to_string(),
            direction: None,
        });
        chart.limit = 5;

        let query = translation::to_sql(&mut chart).unwrap();
        assert!(query.sql.ends_with(" ORDER BY status ASC LIMIT 5"));
    }

    #[test]
    fn invalid_charts_are_rejected_before_building() {
        let mut chart = common::chart_with_filters(vec![]);
        chart.title = String::new();

        let error = translation::to_sql(&mut chart).unwrap_err();
        assert!(matches!(error, ChartQueryError::Validation(_)));
        assert_eq!(
            error.to_string(),
            "invalid chart configuration: title is required"
        );
    }

    #[test]
    fn unbuildable_filters_report_the_build_stage() {
        let mut chart = common::chart_with_filters(vec![FilterSpec::predicate(
            "amount",
            "BETWEEN",
            FilterValue::List(vec![Some(10_i64.into()), None]),
        )]);

        let error = translation::to_sql(&mut chart).unwrap_err();
        assert_eq!(
            error,
            ChartQueryError::Build(Error::NullInBetween {
                column: "amount".to_string()
            })
        );
        assert_eq!(
            error.to_string(),
            "unable to build chart query: BETWEEN operator cannot have NULL values (filter on 'amount')"
        );
    }

    #[test]
    fn single_membership_values_survive_validation() {
        let filter: FilterSpec = serde_json::from_value(serde_json::json!({
            "column": "status",
            "operator": "NOT IN",
            "value": "x"
        }))
        .unwrap();
        let mut chart = common::chart_with_filters(vec![filter]);

        let query = translation::to_sql(&mut chart).unwrap();
        assert!(query.sql.ends_with(" WHERE status NOT IN ($1)"));
        assert_eq!(query.params, vec![Param::String("x".to_string())]);
    }

    #[test]
    fn raw_filters_continue_the_numbering() {
        let mut chart = common::chart_with_filters(vec![
            FilterSpec::predicate("status", "=", FilterValue::Scalar("paid".into())),
            FilterSpec::raw(
                "amount BETWEEN $2 AND $3",
                vec![Scalar::from(1_i64), Scalar::from(9_i64)],
            ),
            FilterSpec::predicate("region", "!=", FilterValue::Scalar("eu".into())),
        ]);

        let query = translation::to_sql(&mut chart).unwrap();
        assert_eq!(
            query.sql,
            "SELECT status as x_value, amount as y_value_0 FROM orders WHERE status = $1 AND amount BETWEEN $2 AND $3 AND region != $4"
        );
        assert_eq!(
            query.params,
            vec![
                Param::String("paid".to_string()),
                Param::Number(1_i64.into()),
                Param::Number(9_i64.into()),
                Param::String("eu".to_string()),
            ]
        );
    }
}

mod filters {
    use super::common::translate_where;
    use chart_query_configuration::{FilterSpec, FilterValue, Scalar};
    use query_engine_sql::sql::string::Param;
    use query_engine_translation::translation::Error;
    use similar_asserts::assert_eq;

    fn scalar(column: &str, operator: &str, value: impl Into<Scalar>) -> FilterSpec {
        FilterSpec::predicate(column, operator, FilterValue::Scalar(value.into()))
    }

    fn list(column: &str, operator: &str, values: Vec<Option<Scalar>>) -> FilterSpec {
        FilterSpec::predicate(column, operator, FilterValue::List(values))
    }

    fn render(filter: FilterSpec) -> (String, Vec<Param>) {
        let query = translate_where(&[filter]).unwrap();
        (
            query.sql.trim_start_matches(" WHERE ").to_string(),
            query.params,
        )
    }

    fn text(value: &str) -> Param {
        Param::String(value.to_string())
    }

    #[test]
    fn equality_binds_its_value() {
        assert_eq!(
            render(scalar("status", "=", "completed")),
            ("status = $1".to_string(), vec![text("completed")])
        );
    }

    #[test]
    fn equality_with_null_is_a_null_test() {
        assert_eq!(
            render(FilterSpec::predicate("deleted_at", "=", FilterValue::Null)),
            ("deleted_at IS NULL".to_string(), vec![])
        );
        assert_eq!(
            render(FilterSpec::predicate(
                "deleted_at",
                "<>",
                FilterValue::Absent
            )),
            ("deleted_at IS NOT NULL".to_string(), vec![])
        );
    }

    #[test]
    fn boolean_literals_are_truth_tests() {
        assert_eq!(
            render(scalar("is_active", "=", "true")),
            ("is_active IS TRUE".to_string(), vec![])
        );
        assert_eq!(
            render(scalar("is_active", "=", "False")),
            ("is_active IS FALSE".to_string(), vec![])
        );
        assert_eq!(
            render(scalar("is_active", "!=", true)),
            ("is_active IS NOT TRUE".to_string(), vec![])
        );
        assert_eq!(
            render(scalar("is_active", "<>", false)),
            ("is_active IS NOT FALSE".to_string(), vec![])
        );
    }

    #[test]
    fn operators_are_emitted_as_written() {
        assert_eq!(
            render(scalar("name", "ilike", "%a%")),
            ("name ilike $1".to_string(), vec![text("%a%")])
        );
        assert_eq!(
            render(scalar("amount", ">=", 5_i64)),
            (
                "amount >= $1".to_string(),
                vec![Param::Number(5_i64.into())]
            )
        );
    }

    #[test]
    fn ordering_comparisons_reject_null() {
        let error = translate_where(&[FilterSpec::predicate("amount", "<", FilterValue::Null)])
            .unwrap_err();
        assert_eq!(
            error,
            Error::NullComparison {
                operator: "<".to_string(),
                column: "amount".to_string()
            }
        );
        assert_eq!(
            error.to_string(),
            "comparison operator < cannot compare with NULL (filter on 'amount')"
        );
    }

    #[test]
    fn pattern_matches_against_null_are_null_tests() {
        assert_eq!(
            render(FilterSpec::predicate("name", "NOT LIKE", FilterValue::Null)),
            ("name IS NULL".to_string(), vec![])
        );
    }

    #[test]
    fn unknown_operators_pass_through() {
        assert_eq!(
            render(scalar("tags", "@>", "{a}")),
            ("tags @> $1".to_string(), vec![text("{a}")])
        );
        assert_eq!(
            render(FilterSpec::predicate("tags", "@>", FilterValue::Absent)),
            ("tags IS NULL".to_string(), vec![])
        );
    }

    #[test]
    fn membership_without_nulls() {
        assert_eq!(
            render(list(
                "id",
                "IN",
                vec![Some(1_i64.into()), Some(2_i64.into())]
            )),
            (
                "id IN ($1, $2)".to_string(),
                vec![Param::Number(1_i64.into()), Param::Number(2_i64.into())]
            )
        );
        assert_eq!(
            render(list("id", "not in", vec![Some("a".into())])),
            ("id NOT IN ($1)".to_string(), vec![text("a")])
        );
    }

    #[test]
    fn membership_with_mixed_values_also_matches_null() {
        assert_eq!(
            render(list(
                "id",
                "IN",
                vec![Some(1_i64.into()), Some(2_i64.into()), None]
            )),
            (
                "(id IN ($1, $2) OR id IS NULL)".to_string(),
                vec![Param::Number(1_i64.into()), Param::Number(2_i64.into())]
            )
        );
        assert_eq!(
            render(list("id", "NOT IN", vec![None, Some("x".into())])),
            (
                "(id NOT IN ($1) OR id IS NULL)".to_string(),
                vec![text("x")]
            )
        );
    }

    #[test]
    fn membership_of_a_single_value() {
        assert_eq!(
            render(scalar("status", "NOT IN", "x")),
            ("status NOT IN ($1)".to_string(), vec![text("x")])
        );
        assert_eq!(
            render(scalar("status", "IN", 3_i64)),
            (
                "status IN ($1)".to_string(),
                vec![Param::Number(3_i64.into())]
            )
        );
        assert_eq!(
            render(FilterSpec::predicate("status", "NOT IN", FilterValue::Null)),
            ("status IS NOT NULL".to_string(), vec![])
        );
        assert_eq!(
            render(FilterSpec::predicate("status", "IN", FilterValue::Null)),
            ("status IS NULL".to_string(), vec![])
        );
    }

    #[test]
    fn membership_of_only_nulls() {
        assert_eq!(
            render(list("id", "IN", vec![None, None])),
            ("id IS NULL".to_string(), vec![])
        );
        assert_eq!(
            render(list("id", "NOT IN", vec![None])),
            ("id IS NOT NULL".to_string(), vec![])
        );
    }

    #[test]
    fn between_binds_both_bounds() {
        assert_eq!(
            render(list(
                "amount",
                "between",
                vec![Some(10_i64.into()), Some(20_i64.into())]
            )),
            (
                "amount BETWEEN $1 AND $2".to_string(),
                vec![Param::Number(10_i64.into()), Param::Number(20_i64.into())]
            )
        );
    }

    #[test]
    fn between_rejects_null_bounds() {
        let error = translate_where(&[list("amount", "BETWEEN", vec![Some(10_i64.into()), None])])
            .unwrap_err();
        assert_eq!(
            error.to_string(),
            "BETWEEN operator cannot have NULL values (filter on 'amount')"
        );
    }

    #[test]
    fn null_tests_ignore_values() {
        assert_eq!(
            render(scalar("deleted_at", "IS NULL", "ignored")),
            ("deleted_at IS NULL".to_string(), vec![])
        );
        assert_eq!(
            render(scalar("deleted_at", "is not null", 3_i64)),
            ("deleted_at IS NOT NULL".to_string(), vec![])
        );
    }

    #[test]
    fn predicates_share_one_counter() {
        let query = translate_where(&[
            scalar("a", "=", 1_i64),
            list("b", "IN", vec![Some("x".into()), Some("y".into())]),
            scalar("c", ">", 2_i64),
        ])
        .unwrap();
        assert_eq!(query.sql, " WHERE a = $1 AND b IN ($2, $3) AND c > $4");
        assert_eq!(query.params.len(), 4);
    }

    #[test]
    fn no_filters_no_where() {
        let query = translate_where(&[]).unwrap();
        assert_eq!(query.sql, "");
        assert!(query.params.is_empty());
    }
}
