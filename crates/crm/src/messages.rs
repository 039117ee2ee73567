pub const NO_OPPORTUNITY_STATUS: &str = "Please fill the opportunity status";
pub const BATCH_UNKNOWN_ACTION: &str = "Unknown action {} for the batch {}";
pub const BATCH_MONTH_NOT_POSITIVE: &str = "The number of months must be greater than zero";
pub const BATCH_IMPROPER_TEMPLATE: &str =
    "The template must contain the _callForTendersList variable";
pub const BATCH_SENDER_EMAIL_NOT_CONFIGURED: &str = "Please configure the sender email of the batch";
pub const EVENT_WITHOUT_START: &str = "The event {} has no start date";
pub const TARGET_INVALID_PERIOD: &str = "The target configuration {} ends before it starts";
pub const CALL_FOR_TENDERS_SUBJECT: &str = "Calls for tenders to answer";

pub const FR: &[(&str, &str)] = &[
    (NO_OPPORTUNITY_STATUS, "Veuillez renseigner le statut de l'opportunité"),
    (BATCH_UNKNOWN_ACTION, "Action {} inconnue pour le traitement {}"),
    (
        BATCH_MONTH_NOT_POSITIVE,
        "Le nombre de mois doit être strictement positif",
    ),
    (
        BATCH_IMPROPER_TEMPLATE,
        "Le modèle doit contenir la variable _callForTendersList",
    ),
    (
        BATCH_SENDER_EMAIL_NOT_CONFIGURED,
        "Veuillez configurer l'email d'expédition du traitement",
    ),
    (EVENT_WITHOUT_START, "L'événement {} n'a pas de date de début"),
    (
        TARGET_INVALID_PERIOD,
        "La configuration d'objectif {} se termine avant de commencer",
    ),
    (CALL_FOR_TENDERS_SUBJECT, "Appels d'offres à traiter"),
];
