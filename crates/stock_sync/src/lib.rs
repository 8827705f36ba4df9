//! Выгрузка остатков и цен из файла поставщика на OZON и Яндекс Маркет

pub mod shared;
pub mod usecases;
