/// Метаданные UseCase для идентификации и документирования
pub trait UseCaseMetadata {
    /// Индекс UseCase (например, "u600")
    fn usecase_index() -> &'static str;

    /// Техническое имя (например, "sync_stocks")
    fn usecase_name() -> &'static str;

    /// Отображаемое имя
    fn display_name() -> &'static str;

    /// Описание UseCase
    fn description() -> &'static str {
        ""
    }

    /// Полное имя вида "u600_sync_stocks"
    fn full_name() -> String {
        format!("{}_{}", Self::usecase_index(), Self::usecase_name())
    }
}
