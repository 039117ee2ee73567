//! Message keys raised by the accounting services and their French translations.

pub const PERIOD_NOT_FOUND: &str = "No period found or it has been closed for the company {}";
pub const PERIOD_NO_PERMISSION: &str =
    "The period {} is closed and you do not have the rights to account on it";
pub const PARTNER_INCOMPATIBLE: &str = "The partner {} is not compatible with the journal {}";
pub const DUPLICATE_ORIGIN: &str = "The origin {} is already used in the moves {}";
pub const ORIGIN_REQUIRED: &str = "The origin field is required for the journal {}";
pub const LINE_DATE_OUTSIDE_PERIOD: &str = "The date of the move line {} is outside the period {}";
pub const RECONCILED_LINE_REMOVED: &str = "The move line {} is reconciled and cannot be removed";
pub const ANALYTIC_REQUIRED: &str =
    "An analytic distribution is required on the move line {} for the account {}";
pub const MOVE_NO_LINES: &str = "The move {} has no lines";
pub const MOVE_LINE_NO_ACCOUNT: &str = "The move line {} has no account";
pub const MOVE_LINE_DEBIT_AND_CREDIT: &str = "The move line {} has both a debit and a credit";
pub const MOVE_LINE_NEGATIVE: &str = "The move line {} has a negative amount";
pub const MOVE_NOT_BALANCED: &str = "The move {} is not balanced: debit {} / credit {}";
pub const MOVE_MISSING_DATE: &str = "The move {} has no date";
pub const MOVE_MISSING_PERIOD: &str = "The move {} has no period";
pub const MOVE_MISSING_JOURNAL: &str = "The move {} has no journal";
pub const MOVE_MISSING_COMPANY: &str = "The move {} has no company";
pub const MOVE_PERIOD_CLOSED: &str = "The period {} of the move {} is closed";
pub const INVOICE_TERMS_NOT_UPDATED: &str =
    "Some invoice terms were not updated because they are already in payment";
pub const INVOICE_TERM_IN_PAYMENT_VOUCHER: &str =
    "Invoice terms of this move are used in the payment vouchers {}, changes are not allowed";
pub const INVOICE_TERM_IN_PAYMENT_SESSION: &str =
    "Invoice terms of this move are used in the payment sessions {}, changes are not allowed";
pub const INVOICE_TERM_AWAITING_PAYMENT: &str =
    "Invoice terms of this move are awaiting payment, changes are not allowed";
pub const INVOICE_TERM_UNKNOWN: &str = "Invoice term {} does not belong to the invoice";

pub const FR: &[(&str, &str)] = &[
    (
        PERIOD_NOT_FOUND,
        "Aucune période trouvée ou elle a été clôturée pour la société {}",
    ),
    (
        PERIOD_NO_PERMISSION,
        "La période {} est clôturée et vous n'avez pas les droits pour y comptabiliser",
    ),
    (
        PARTNER_INCOMPATIBLE,
        "Le tiers {} n'est pas compatible avec le journal {}",
    ),
    (
        DUPLICATE_ORIGIN,
        "L'origine {} est déjà utilisée dans les écritures {}",
    ),
    (ORIGIN_REQUIRED, "L'origine est obligatoire pour le journal {}"),
    (
        LINE_DATE_OUTSIDE_PERIOD,
        "La date de la ligne d'écriture {} est hors de la période {}",
    ),
    (
        RECONCILED_LINE_REMOVED,
        "La ligne d'écriture {} est lettrée et ne peut pas être supprimée",
    ),
    (
        ANALYTIC_REQUIRED,
        "Une répartition analytique est requise sur la ligne {} pour le compte {}",
    ),
    (MOVE_NO_LINES, "L'écriture {} n'a aucune ligne"),
    (MOVE_LINE_NO_ACCOUNT, "La ligne d'écriture {} n'a pas de compte"),
    (
        MOVE_LINE_DEBIT_AND_CREDIT,
        "La ligne d'écriture {} a à la fois un débit et un crédit",
    ),
    (MOVE_LINE_NEGATIVE, "La ligne d'écriture {} a un montant négatif"),
    (
        MOVE_NOT_BALANCED,
        "L'écriture {} n'est pas équilibrée : débit {} / crédit {}",
    ),
    (MOVE_MISSING_DATE, "L'écriture {} n'a pas de date"),
    (MOVE_MISSING_PERIOD, "L'écriture {} n'a pas de période"),
    (MOVE_MISSING_JOURNAL, "L'écriture {} n'a pas de journal"),
    (MOVE_MISSING_COMPANY, "L'écriture {} n'a pas de société"),
    (MOVE_PERIOD_CLOSED, "La période {} de l'écriture {} est clôturée"),
    (
        INVOICE_TERMS_NOT_UPDATED,
        "Certaines échéances n'ont pas été mises à jour car elles sont déjà en paiement",
    ),
    (
        INVOICE_TERM_IN_PAYMENT_VOUCHER,
        "Des échéances de cette écriture sont utilisées dans les saisies paiement {}, les modifications ne sont pas autorisées",
    ),
    (
        INVOICE_TERM_IN_PAYMENT_SESSION,
        "Des échéances de cette écriture sont utilisées dans les sessions de paiement {}, les modifications ne sont pas autorisées",
    ),
    (
        INVOICE_TERM_AWAITING_PAYMENT,
        "Des échéances de cette écriture sont en attente de paiement, les modifications ne sont pas autorisées",
    ),
    (
        INVOICE_TERM_UNKNOWN,
        "L'échéance {} n'appartient pas à la facture",
    ),
];
