//! Catalog seeding.
//!
//! Idempotent: the fixed furniture list is inserted only when the `products`
//! table is empty. Runs once at startup before the listener is bound, and on
//! demand via `mebel-cli seed`.

use sqlx::SqlitePool;

use super::RepositoryError;
use super::products::{NewProduct, count_in, insert_in};

/// Shorthand for a catalog entry priced in whole roubles.
const fn item(
    name: &'static str,
    description: &'static str,
    roubles: i64,
    image_filename: &'static str,
) -> NewProduct<'static> {
    NewProduct {
        name,
        description,
        price_kopecks: roubles * 100,
        image_filename,
    }
}

/// The initial furniture catalog, in display order.
pub const CATALOG: &[NewProduct<'static>] = &[
    // Детская мебель
    item("FLINTAN", "Удобный и безопасный стул для ребёнка.", 8900, "детскийстул.jpg"),
    item("SMÅSTOK", "Модный стул с эргономичной формой.", 9500, "детскийстул2.jpg"),
    // Диваны
    item("MILLBERGET", "Современный диван с хромированными ножками.", 42900, "диван.jpg"),
    item("KIVIK", "Компактный диван для малогабаритных квартир.", 38500, "диван3.jpg"),
    item("SÖDERHAMN", "Просторный диван для гостиной.", 52000, "диванбольшой.jpg"),
    item("POÄNG ROUND", "Необычный диван-кокон для уютного отдыха.", 65000, "диванкруг.jpg"),
    // Зеркала
    item("HOVET SET", "Набор из 5 зеркал в серебряных рамах.", 12000, "зеркала круглые.jpg"),
    item("LILLÅNGEN", "Овальное зеркало в форме капли воды.", 15800, "зеркало капля.jpg"),
    item("NISSEDAL", "Прямоугольное зеркало с тонкой рамой.", 11200, "зеркало1.jpg"),
    // Кресла
    item("POÄNG", "Кресло-качалка с эффектом «облака».", 18500, "качалка.jpg"),
    item("EKTORP", "Элегантное кресло для кабинета.", 22000, "кресло2.jpg"),
    item("KARLANDA", "Роскошное кресло в стиле ар-нуво.", 28000, "кресло3.jpg"),
    item("STRANDMON", "Подвесное кресло-шар из прозрачного акрила.", 35000, "креслошар.jpg"),
    item("TARVA", "Шаровое кресло с подушкой.", 37000, "креслошар2.jpg"),
    item("VIKARE", "Гигантское шаровое кресло.", 45000, "креслошар3.jpg"),
    item("LÖVBACKEN", "Розовое кресло-шар для романтиков.", 42000, "креслошар4.jpg"),
    // Комоды
    item("MALM", "Комод с 5 ящиками и зеркалом.", 25000, "комод.jpg"),
    item("HEMNES", "Роскошный комод в стиле барокко.", 32000, "комод2.jpg"),
    // Лампы
    item("HEKTAR", "Лампа с розовым абажуром и металлической основой.", 9800, "лампа.jpg"),
    // Столы
    item("INGATORP", "Обеденный стол + 4 стула.", 48000, "стол со стульями.jpg"),
    item("LACK", "Журнальный столик с матовым стеклом.", 12000, "столжурнал.jpg"),
    item("NORDVIKEN", "Столик на ножках в виде ангелов.", 18000, "столик ангелы.jpg"),
    item("RANARP", "Мини-столик для чая или книг.", 8500, "столик.jpg"),
    item("BRIMNES", "Набор из 3 столиков разного размера.", 22000, "столы3.jpg"),
    // Стулья
    item("ADDE", "Барский стул с высокой спинкой.", 15000, "стул барский.jpg"),
    item("JOKKMOKK", "Стул из прозрачного акрила.", 13000, "стул голубой.jpg"),
    item("TÖRNVIKEN", "Минималистичный стул с изогнутыми ножками.", 11000, "стул.jpg"),
    item("SKRUVSTA", "Современный стул с хромированными ножками.", 14000, "стул4.jpg"),
    // Табуреты
    item("PALL", "Табурет с мягким сиденьем.", 7500, "табурет.jpg"),
    item("ÖRFJÄLL", "Дизайнерская табуретка в форме куба.", 9000, "табуретка.jpg"),
    // Пуфики и остальное
    item("KALLAX", "Пуфики-трансформеры.", 9800, "серебро_пуфики.jpg"),
    item("APPLARÖ", "Садовая лавка с алюминиевым каркасом.", 15200, "серебро_лавка.jpg"),
    item("SÖDERHAMN CHAIR", "Удобное кресло с эффектом «облака».", 18500, "серебро_кресло.jpg"),
    item("MARKUS", "Эргономичное кресло с поддержкой поясницы.", 21400, "серебро_кресло2.jpg"),
];

/// Seed the catalog if it is empty.
///
/// The emptiness check and the inserts share one transaction, so a partially
/// seeded catalog is never committed.
///
/// Returns the number of products inserted (0 if the catalog already had rows).
///
/// # Errors
///
/// Returns `RepositoryError::Database` if any statement fails.
pub async fn seed_catalog(pool: &SqlitePool) -> Result<usize, RepositoryError> {
    let mut tx = pool.begin().await?;

    let existing = count_in(&mut *tx).await?;
    if existing > 0 {
        tracing::debug!(existing, "Catalog already seeded");
        return Ok(0);
    }

    for product in CATALOG {
        insert_in(&mut tx, product).await?;
    }

    tx.commit().await?;

    tracing::info!(inserted = CATALOG.len(), "Catalog seeded");
    Ok(CATALOG.len())
}
