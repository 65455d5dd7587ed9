//! First-run seeding: the admin account, sample news and the school menu.
//!
//! Each part is seeded only when its table is empty, so running bootstrap
//! against an initialised store changes nothing.

use school_shared::api::CreateMenuItemRequest;

use crate::auth::hash_password;
use crate::error::AppError;
use crate::menu::MenuService;
use crate::store::{NewNewsArticle, NewUser, Store};

pub const DEFAULT_ADMIN_USERNAME: &str = "admin";
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin";

/// (title, image, content)
pub const SEED_NEWS: &[(&str, &str, &str)] = &[
    (
        "26 квітня — 39-та річниця Чорнобильської трагедії",
        "chernobyl.jpg",
        "Пам’ятаємо. Шануємо. Вічна слава героям Чорнобиля.",
    ),
    (
        "До уваги батьків майбутніх першокласників!",
        "schoolkids.jpg",
        "Оголошено набір у перші класи на 2025-2026 навчальний рік.",
    ),
    (
        "Лекторій «Тайм-менеджмент у професійній діяльності педагога»",
        "lecture.jpg",
        "Педагоги школи пройшли тренінг із сучасного планування робочого часу.",
    ),
];

/// Top-level menu entries as (title, slug).
pub const SEED_MENU_ROOTS: &[(&str, &str)] = &[
    ("ПРО ШКОЛУ", "pro-shkolu"),
    ("Зарахування до закладу освіти", "zarahuvannya"),
    ("Новини", "novyny"),
    ("Контакти", "kontakty"),
    ("Виконання вимог ст.30 Закону України \"Про освіту\"", "pro-osvitu"),
    ("Результати державного контролю", "derzhkontrol"),
    ("Освітній процес", "osvitnij-proces"),
    ("Долаємо освітні втрати разом", "dolajemo-vtraty"),
    ("НМТ - 2025", "nmt-2025"),
    ("Здорове харчування", "zdorove-harchuvannya"),
    ("Дистанційне навчання", "distancijne-navchannya"),
    ("Актуальне: Булінг", "buling"),
    ("Виховна робота", "vykhovna-robota"),
    ("Учнівське самоврядування", "samospravy"),
    ("Канікули", "kanikuly"),
    ("Психологічна служба", "psyhologichna-sluzhba"),
    ("Гендерна рівність", "gender-equality"),
    ("Безпечне освітнє середовище", "safe-environment"),
    ("Шкільна бібліотека", "library"),
    ("Фінансова діяльність", "finansy"),
    ("Енергозбереження", "energozberezhennya"),
    ("Запитуйте - відповімо", "faq"),
    ("Календар", "calendar"),
];

/// Submenu titles keyed by the parent's slug. Child slugs are generated.
pub const SEED_MENU_CHILDREN: &[(&str, &[&str])] = &[
    (
        "pro-shkolu",
        &[
            "Територія обслуговування школи",
            "Візитка школи, Мережа класів",
            "Структура та органи управління закладу освіти",
            "Кадровий склад",
            "Атестація педагогічних працівників",
            "Правила поведінки учасників освітнього процесу",
            "Матеріально-технічне забезпечення",
            "Вимоги до навчального кабінету",
            "Шкільна кінопанорама",
            "Історія школи",
            "Галерея",
            "Незабутні шкільні роки (2017-2018)",
        ],
    ),
    ("zarahuvannya", &["Зарахування до 1 класу"]),
    (
        "pro-osvitu",
        &[
            "Положення про внутрішню систему забезпечення якості освіти",
            "Положення про академічну доброчесність",
            "Індивідуальна форма навчання",
            "Організація інклюзивного навчання",
            "Вакансії",
            "Робота зі зверненнями громадян",
            "Звіт про діяльність закладу освіти",
            "Звіт керівника",
        ],
    ),
    (
        "osvitnij-proces",
        &[
            "Режим роботи",
            "Розклад уроків",
            "Освітні програми",
            "Освітні компоненти",
            "Критерії оцінювання навчальних досягнень учнів",
            "Нова українська школа",
            "На допомогу вчителю НУШ",
            "Методична робота школи І ступеня",
            "Новий освітній простір",
            "Методична робота",
            "Професійна рада",
            "Предметні тижні",
            "Сайти, блоги вчителів",
            "Робота з талановитою молоддю",
            "Результати моніторингу якості освіти",
        ],
    ),
    (
        "zdorove-harchuvannya",
        &[
            "Батькам про здорове харчування",
            "Учням про здорове харчування",
        ],
    ),
    (
        "buling",
        &[
            "Нормативно-правова база з питань булінгу",
            "Права та обов'язки учня",
            "Правила поведінки здобувачів освіти",
            "План заходів проти булінгу",
            "Порядок подання та розгляду заяв",
            "Порядок реагування на випадки булінгу",
            "Відповідальні особи",
            "Телефони довіри",
            "Корисні поради",
            "Поради учням",
            "Поради батькам",
            "Поради вчителям",
            "Інформаційні матеріали",
            "Всеукраїнська акція \"16 днів проти насильства\"",
        ],
    ),
    (
        "vykhovna-robota",
        &[
            "Нормативно-правове забезпечення виховної роботи",
            "Система виховної роботи",
            "Класному керівнику",
            "Патріотичне виховання",
            "Рій \"Краяни\"",
            "КНИГА ЗВІТІВ рою \"Краяни\"",
            "Профілактика правопорушень та злочинності",
            "Робота з батьками",
            "Профорієнтаційна робота",
        ],
    ),
    (
        "psyhologichna-sluzhba",
        &[
            "Національна дитяча гаряча лінія",
            "Всеукраїнська програма ментального здоров'я \"Ти як?\"",
        ],
    ),
    (
        "safe-environment",
        &[
            "Безпека життєдіяльності",
            "Безпека дорожнього руху",
            "Безпека в Інтернеті",
            "Про протидію онлайн шахрайствам",
            "Цивільний захист",
            "Платформа МРІЯ",
            "БРАМА - онлайн варта України",
        ],
    ),
    (
        "library",
        &[
            "Електронні підручники",
            "Місячник шкільної бібліотеки",
            "Конкурсний відбір проєктів учнів",
            "Виховна робота бібліотеки",
            "Новинки літератури",
            "Літературні виставки",
            "Медіатека",
            "Букстейлери",
            "Що читати учням влітку",
        ],
    ),
    ("finansy", &["Кошторис", "Капітальні ремонти", "Предмети закупівлі"]),
];

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BootstrapReport {
    pub admin_created: bool,
    pub news_seeded: usize,
    pub menu_items_seeded: usize,
}

impl BootstrapReport {
    pub fn is_noop(&self) -> bool {
        *self == Self::default()
    }
}

pub async fn bootstrap<S: Store + ?Sized>(store: &S) -> Result<BootstrapReport, AppError> {
    let report = BootstrapReport {
        admin_created: seed_admin(store).await?,
        news_seeded: seed_news(store).await?,
        menu_items_seeded: seed_menu(store).await?,
    };

    if report.is_noop() {
        tracing::debug!("Store already initialised, nothing seeded");
    } else {
        tracing::info!(
            admin_created = report.admin_created,
            news = report.news_seeded,
            menu_items = report.menu_items_seeded,
            "Bootstrap seeding complete"
        );
    }

    Ok(report)
}

async fn seed_admin<S: Store + ?Sized>(store: &S) -> Result<bool, AppError> {
    if store
        .find_user_by_username(DEFAULT_ADMIN_USERNAME)
        .await?
        .is_some()
    {
        return Ok(false);
    }

    store
        .create_user(NewUser {
            username: DEFAULT_ADMIN_USERNAME.to_string(),
            password_hash: hash_password(DEFAULT_ADMIN_PASSWORD)?,
            is_admin: true,
        })
        .await?;

    tracing::warn!("Created default admin account; change its password");
    Ok(true)
}

async fn seed_news<S: Store + ?Sized>(store: &S) -> Result<usize, AppError> {
    if store.count_news().await? > 0 {
        return Ok(0);
    }

    for (title, image, content) in SEED_NEWS {
        store
            .create_news(NewNewsArticle {
                title: title.to_string(),
                image: Some(image.to_string()),
                content: Some(content.to_string()),
            })
            .await?;
    }

    Ok(SEED_NEWS.len())
}

async fn seed_menu<S: Store + ?Sized>(store: &S) -> Result<usize, AppError> {
    if store.count_menu_items().await? > 0 {
        return Ok(0);
    }

    let menu = MenuService::new(store);
    let mut seeded = 0;

    let mut roots = Vec::with_capacity(SEED_MENU_ROOTS.len());
    for (title, slug) in SEED_MENU_ROOTS {
        let root = menu
            .create(CreateMenuItemRequest {
                title: title.to_string(),
                slug: Some(slug.to_string()),
                url: None,
                parent_id: None,
                content: None,
            })
            .await?;
        roots.push(root);
        seeded += 1;
    }

    for (parent_slug, titles) in SEED_MENU_CHILDREN {
        let parent = roots
            .iter()
            .find(|r| r.slug == *parent_slug)
            .ok_or_else(|| {
                AppError::Internal(anyhow::anyhow!("Seed parent '{}' missing", parent_slug))
            })?;

        for title in titles.iter() {
            menu.create(CreateMenuItemRequest {
                title: title.to_string(),
                slug: None,
                url: None,
                parent_id: Some(parent.id),
                content: None,
            })
            .await?;
            seeded += 1;
        }
    }

    Ok(seeded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::verify_password;
    use crate::menu::build_menu_structure;
    use crate::store::{MemoryStore, MenuStore, NewsStore, UserStore};

    fn seed_total() -> usize {
        SEED_MENU_ROOTS.len()
            + SEED_MENU_CHILDREN
                .iter()
                .map(|(_, titles)| titles.len())
                .sum::<usize>()
    }

    #[test]
    fn seed_table_shape() {
        assert_eq!(SEED_MENU_ROOTS.len(), 23);
        assert_eq!(seed_total(), 105);
    }

    #[tokio::test]
    async fn bootstrap_seeds_an_empty_store() {
        let store = MemoryStore::new();

        let report = bootstrap(&store).await.unwrap();
        assert!(report.admin_created);
        assert_eq!(report.news_seeded, 3);
        assert_eq!(report.menu_items_seeded, seed_total());

        let users = store.list_users().await.unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].username, "admin");
        assert!(users[0].is_admin);
        assert!(verify_password("admin", &users[0].password_hash).unwrap());

        assert_eq!(store.count_news().await.unwrap(), 3);

        let items = store.list_menu_items().await.unwrap();
        assert_eq!(items.len(), seed_total());
        let menu = build_menu_structure(&items);
        assert_eq!(menu.len(), SEED_MENU_ROOTS.len());

        // Every seeded item is rendered, so nothing sits below the second level
        let rendered: usize = menu
            .iter()
            .map(|e| 1 + e.submenu.as_ref().map_or(0, Vec::len))
            .sum();
        assert_eq!(rendered, seed_total());

        let about = menu.iter().find(|e| e.slug == "pro-shkolu").unwrap();
        assert_eq!(about.submenu.as_ref().unwrap().len(), 12);
        let contacts = menu.iter().find(|e| e.slug == "kontakty").unwrap();
        assert!(contacts.submenu.is_none());
    }

    #[tokio::test]
    async fn bootstrap_is_idempotent() {
        let store = MemoryStore::new();
        bootstrap(&store).await.unwrap();

        let report = bootstrap(&store).await.unwrap();

        assert!(report.is_noop());
        assert_eq!(store.list_users().await.unwrap().len(), 1);
        assert_eq!(store.count_news().await.unwrap(), 3);
        assert_eq!(store.count_menu_items().await.unwrap() as usize, seed_total());
    }
}
