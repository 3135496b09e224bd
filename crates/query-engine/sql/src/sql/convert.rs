//! Convert a SQL AST to a low-level SQL string.

use super::ast::*;
use super::string::SQL;

// Convert to SQL strings

impl Select {
    pub fn to_sql(&self, sql: &mut SQL) {
        sql.append_syntax("SELECT ");

        self.select_list.to_sql(sql);

        if let Some(from) = &self.from {
            from.to_sql(sql);
        }

        for join in &self.joins {
            join.to_sql(sql);
        }

        self.where_.to_sql(sql);

        self.group_by.to_sql(sql);

        self.order_by.to_sql(sql);

        self.limit.to_sql(sql);
    }
}

impl SelectList {
    pub fn to_sql(&self, sql: &mut SQL) {
        let SelectList(select_list) = self;
        for (index, (alias, expr)) in select_list.iter().enumerate() {
            if index > 0 {
                sql.append_syntax(", ");
            }
            expr.to_sql(sql);
            sql.append_syntax(" as ");
            alias.to_sql(sql);
        }
    }
}

impl From {
    pub fn to_sql(&self, sql: &mut SQL) {
        sql.append_syntax(" FROM ");
        self.table.to_sql(sql);
        if let Some(alias) = &self.alias {
            sql.append_syntax(" ");
            alias.to_sql(sql);
        }
    }
}

impl Join {
    pub fn to_sql(&self, sql: &mut SQL) {
        sql.append_syntax(" ");
        self.kind.to_sql(sql);
        sql.append_syntax(" JOIN ");
        self.table.to_sql(sql);
        if let Some(alias) = &self.alias {
            sql.append_syntax(" ");
            alias.to_sql(sql);
        }
        sql.append_syntax(" ON ");
        self.on.to_sql(sql);
    }
}

impl JoinKind {
    pub fn to_sql(&self, sql: &mut SQL) {
        match self {
            JoinKind::Inner => sql.append_syntax("INNER"),
            JoinKind::Left => sql.append_syntax("LEFT"),
            JoinKind::Right => sql.append_syntax("RIGHT"),
            JoinKind::Full => sql.append_syntax("FULL"),
            JoinKind::Other(kind) => sql.append_syntax(kind),
        }
    }
}

impl Where {
    pub fn to_sql(&self, sql: &mut SQL) {
        let Where(predicates) = self;
        if predicates.is_empty() {
            return;
        }
        sql.append_syntax(" WHERE ");
        for (index, predicate) in predicates.iter().enumerate() {
            if index > 0 {
                sql.append_syntax(" AND ");
            }
            predicate.to_sql(sql);
        }
    }
}

impl GroupBy {
    pub fn to_sql(&self, sql: &mut SQL) {
        if self.elements.is_empty() {
            return;
        }
        sql.append_syntax(" GROUP BY ");
        for (index, element) in self.elements.iter().enumerate() {
            if index > 0 {
                sql.append_syntax(", ");
            }
            element.to_sql(sql);
        }
    }
}

impl OrderBy {
    pub fn to_sql(&self, sql: &mut SQL) {
        if self.elements.is_empty() {
            return;
        }
        sql.append_syntax(" ORDER BY ");
        for (index, element) in self.elements.iter().enumerate() {
            if index > 0 {
                sql.append_syntax(", ");
            }
            element.to_sql(sql);
        }
    }
}

impl OrderByElement {
    pub fn to_sql(&self, sql: &mut SQL) {
        self.target.to_sql(sql);
        if let Some(direction) = &self.direction {
            sql.append_syntax(" ");
            direction.to_sql(sql);
        }
    }
}

impl OrderByDirection {
    pub fn to_sql(&self, sql: &mut SQL) {
        match self {
            OrderByDirection::Asc => sql.append_syntax("ASC"),
            OrderByDirection::Desc => sql.append_syntax("DESC"),
        }
    }
}

impl Limit {
    pub fn to_sql(&self, sql: &mut SQL) {
        match self.limit {
            // a limit of zero means no limit at all
            None | Some(0) => (),
            Some(limit) => {
                sql.append_syntax(" LIMIT ");
                sql.append_syntax(&limit.to_string());
            }
        }
    }
}

// scalars
impl Expression {
    pub fn to_sql(&self, sql: &mut SQL) {
        match self {
            Expression::Raw(text) => sql.append_syntax(text),
            Expression::Param(param) => sql.append_param(param.clone()),
            Expression::BinaryOperation {
                left,
                operator,
                right,
            } => {
                left.to_sql(sql);
                sql.append_syntax(" ");
                operator.to_sql(sql);
                sql.append_syntax(" ");
                right.to_sql(sql);
            }
            Expression::BinaryArrayOperation {
                left,
                operator,
                right,
            } => {
                left.to_sql(sql);
                sql.append_syntax(" ");
                operator.to_sql(sql);
                sql.append_syntax(" (");
                for (index, item) in right.iter().enumerate() {
                    if index > 0 {
                        sql.append_syntax(", ");
                    }
                    item.to_sql(sql);
                }
                sql.append_syntax(")");
            }
            Expression::UnaryOperation {
                expression,
                operator,
            } => {
                expression.to_sql(sql);
                sql.append_syntax(" ");
                operator.to_sql(sql);
            }
            Expression::Between {
                expression,
                low,
                high,
            } => {
                expression.to_sql(sql);
                sql.append_syntax(" BETWEEN ");
                low.to_sql(sql);
                sql.append_syntax(" AND ");
                high.to_sql(sql);
            }
            Expression::Or { left, right } => {
                sql.append_syntax("(");
                left.to_sql(sql);
                sql.append_syntax(" OR ");
                right.to_sql(sql);
                sql.append_syntax(")");
            }
            Expression::FunctionCall { function, args } => {
                function.to_sql(sql);
                sql.append_syntax("(");
                for (index, arg) in args.iter().enumerate() {
                    if index > 0 {
                        sql.append_syntax(", ");
                    }
                    arg.to_sql(sql);
                }
                sql.append_syntax(")");
            }
            Expression::RawPredicate { sql: text, params } => sql.append_raw(text, params),
        }
    }
}

impl BinaryOperator {
    pub fn to_sql(&self, sql: &mut SQL) {
        let BinaryOperator(operator) = self;
        sql.append_syntax(operator);
    }
}

impl BinaryArrayOperator {
    pub fn to_sql(&self, sql: &mut SQL) {
        match self {
            BinaryArrayOperator::In => sql.append_syntax("IN"),
            BinaryArrayOperator::NotIn => sql.append_syntax("NOT IN"),
        }
    }
}

impl UnaryOperator {
    pub fn to_sql(&self, sql: &mut SQL) {
        match self {
            UnaryOperator::IsNull => sql.append_syntax("IS NULL"),
            UnaryOperator::IsNotNull => sql.append_syntax("IS NOT NULL"),
            UnaryOperator::IsTrue => sql.append_syntax("IS TRUE"),
            UnaryOperator::IsFalse => sql.append_syntax("IS FALSE"),
            UnaryOperator::IsNotTrue => sql.append_syntax("IS NOT TRUE"),
            UnaryOperator::IsNotFalse => sql.append_syntax("IS NOT FALSE"),
        }
    }
}

impl Function {
    pub fn to_sql(&self, sql: &mut SQL) {
        match self {
            Function::Sum => sql.append_syntax("SUM"),
            Function::Count => sql.append_syntax("COUNT"),
            Function::Avg => sql.append_syntax("AVG"),
            Function::Min => sql.append_syntax("MIN"),
            Function::Max => sql.append_syntax("MAX"),
            Function::Unknown(name) => sql.append_syntax(name),
        }
    }
}

// names

impl TableName {
    pub fn to_sql(&self, sql: &mut SQL) {
        let TableName(name) = self;
        sql.append_syntax(name);
    }
}

impl TableAlias {
    pub fn to_sql(&self, sql: &mut SQL) {
        let TableAlias(alias) = self;
        sql.append_syntax(alias);
    }
}

impl ColumnAlias {
    pub fn to_sql(&self, sql: &mut SQL) {
        let ColumnAlias(alias) = self;
        sql.append_syntax(alias);
    }
}
