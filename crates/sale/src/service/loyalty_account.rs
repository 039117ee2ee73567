use chrono::{Days, NaiveDateTime};
use rust_decimal::Decimal;

use erpsuite_core::money;
use erpsuite_core::DomainResult;

use crate::model::{LoyaltyAccount, LoyaltyHistoryLine};

#[derive(Debug, Default, Clone, Copy)]
pub struct LoyaltyAccountService;

impl LoyaltyAccountService {
    pub fn new() -> Self {
        Self
    }

    /// The partner's account in `company`, if any.
    pub fn get_loyalty_account<'a>(
        &self,
        accounts: &'a [LoyaltyAccount],
        partner: &str,
        company: &str,
    ) -> Option<&'a LoyaltyAccount> {
        accounts
            .iter()
            .find(|a| a.partner == partner && a.company == company)
    }

    fn is_acquirable(line: &LoyaltyHistoryLine, delay_days: u32, now: NaiveDateTime) -> bool {
        !line.points_acquired
            && line
                .confirmation_date_time
                .and_then(|confirmed| confirmed.checked_add_days(Days::new(u64::from(delay_days))))
                .is_some_and(|limit| limit < now)
    }

    /// Acquire the points of every order confirmed more than `delay_days`
    /// before `now`, and return the points added to the balance.
    ///
    /// The account is left untouched when the new balance overflows.
    pub fn acquire_points(
        &self,
        account: &mut LoyaltyAccount,
        delay_days: u32,
        now: NaiveDateTime,
    ) -> DomainResult<Decimal> {
        let mut acquired = Decimal::ZERO;
        for line in account
            .history_lines
            .iter()
            .filter(|l| Self::is_acquirable(l, delay_days, now))
        {
            acquired = money::checked_add(acquired, line.points_balance)?;
        }
        let balance = money::checked_add(account.points_balance, acquired)?;

        let mut lines = 0usize;
        for line in account
            .history_lines
            .iter_mut()
            .filter(|l| Self::is_acquirable(l, delay_days, now))
        {
            line.remaining_points = line.points_balance;
            line.acquisition_date_time = Some(now);
            line.points_acquired = true;
            lines += 1;
        }
        account.points_balance = balance;

        if lines > 0 {
            tracing::debug!(
                account = %account.id,
                lines,
                points = %acquired,
                balance = %balance,
                "loyalty points acquired"
            );
        }
        Ok(acquired)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use erpsuite_core::RecordId;
    use proptest::prelude::*;

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(10, 0, 0).unwrap()
    }

    fn account(lines: Vec<LoyaltyHistoryLine>) -> LoyaltyAccount {
        let mut account = LoyaltyAccount::new("C-001", "ACME");
        account.points_balance = Decimal::new(10, 0);
        account.history_lines = lines;
        account
    }

    #[test]
    fn points_are_acquired_once_the_delay_has_passed() {
        let now = at(2024, 3, 20);
        let mut acc = account(vec![
            LoyaltyHistoryLine::new(RecordId::new(), at(2024, 3, 1), Decimal::new(25, 0)),
            LoyaltyHistoryLine::new(RecordId::new(), at(2024, 3, 10), Decimal::new(40, 0)),
        ]);

        let acquired = LoyaltyAccountService::new().acquire_points(&mut acc, 15, now).unwrap();

        assert_eq!(acquired, Decimal::new(25, 0));
        assert_eq!(acc.points_balance, Decimal::new(35, 0));
        let first = &acc.history_lines[0];
        assert!(first.points_acquired);
        assert_eq!(first.remaining_points, Decimal::new(25, 0));
        assert_eq!(first.acquisition_date_time, Some(now));
        assert!(!acc.history_lines[1].points_acquired);
    }

    #[test]
    fn limit_reached_exactly_now_is_not_yet_acquired() {
        let mut acc = account(vec![LoyaltyHistoryLine::new(
            RecordId::new(),
            at(2024, 3, 1),
            Decimal::ONE,
        )]);
        let acquired = LoyaltyAccountService::new()
            .acquire_points(&mut acc, 10, at(2024, 3, 11))
            .unwrap();
        assert_eq!(acquired, Decimal::ZERO);
        assert!(!acc.history_lines[0].points_acquired);
    }

    #[test]
    fn acquired_lines_and_unconfirmed_orders_are_skipped() {
        let mut done = LoyaltyHistoryLine::new(RecordId::new(), at(2024, 1, 1), Decimal::new(5, 0));
        done.points_acquired = true;
        let mut unconfirmed = LoyaltyHistoryLine::new(RecordId::new(), at(2024, 1, 1), Decimal::new(7, 0));
        unconfirmed.confirmation_date_time = None;
        let mut acc = account(vec![done, unconfirmed]);

        let acquired = LoyaltyAccountService::new()
            .acquire_points(&mut acc, 0, at(2024, 6, 1))
            .unwrap();

        assert_eq!(acquired, Decimal::ZERO);
        assert_eq!(acc.points_balance, Decimal::new(10, 0));
    }

    #[test]
    fn overflowing_balance_leaves_the_account_untouched() {
        let mut acc = account(vec![LoyaltyHistoryLine::new(
            RecordId::new(),
            at(2024, 1, 1),
            Decimal::MAX,
        )]);
        let before = acc.clone();

        let err = LoyaltyAccountService::new()
            .acquire_points(&mut acc, 0, at(2024, 6, 1))
            .unwrap_err();

        assert_eq!(err.category(), erpsuite_core::ErrorCategory::Inconsistency);
        assert_eq!(acc, before);
    }

    #[test]
    fn account_lookup_matches_partner_and_company() {
        let accounts = vec![
            LoyaltyAccount::new("C-001", "ACME"),
            LoyaltyAccount::new("C-001", "GLOBEX"),
        ];
        let svc = LoyaltyAccountService::new();
        let found = svc.get_loyalty_account(&accounts, "C-001", "GLOBEX").unwrap();
        assert_eq!(found.id, accounts[1].id);
        assert!(svc.get_loyalty_account(&accounts, "C-002", "ACME").is_none());
    }

    proptest! {
        #[test]
        fn second_run_acquires_nothing(points in proptest::collection::vec(0i64..100_000, 0..10)) {
            let lines = points
                .iter()
                .map(|p| LoyaltyHistoryLine::new(RecordId::new(), at(2024, 1, 1), Decimal::new(*p, 0)))
                .collect();
            let mut acc = account(lines);
            let svc = LoyaltyAccountService::new();

            let first = svc.acquire_points(&mut acc, 30, at(2024, 6, 1)).unwrap();
            let balance = acc.points_balance;
            let second = svc.acquire_points(&mut acc, 30, at(2024, 6, 2)).unwrap();

            prop_assert_eq!(first, points.iter().map(|p| Decimal::new(*p, 0)).sum::<Decimal>());
            prop_assert_eq!(second, Decimal::ZERO);
            prop_assert_eq!(acc.points_balance, balance);
        }
    }
}
