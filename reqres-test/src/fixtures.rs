//! Hand-maintained oracle data for the ReqRes dataset.

use reqres_client::models::{Color, Page, Single, User};

pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";
pub const MISSING_PASSWORD: &str = "Missing password";

pub const EVE_HOLT_EMAIL: &str = "eve.holt@reqres.in";
pub const EVE_HOLT_PASSWORD: &str = "pistol";
pub const TOKEN: &str = "QpwL5tke4Pnpja7X4";
/// Id returned when Eve Holt registers.
pub const REGISTERED_ID: u64 = 4;

/// Register attempt without a password.
pub const REGISTER_MISSING_PASSWORD_EMAIL: &str = "sydney@fife";
/// Login attempt without a password.
pub const LOGIN_MISSING_PASSWORD_EMAIL: &str = "peter@klaven";

/// Id the mutating cases target. The remote never persists, so the cases
/// stay order-independent.
pub const TARGET_USER_ID: u64 = 2;
pub const NONEXISTENT_ID: u64 = 23;

pub const PER_PAGE: u64 = 6;

pub const CREATE_NAME: &str = "morpheus";
pub const CREATE_JOB: &str = "leader";
pub const UPDATE_JOB: &str = "zion resident";

const USERS: [(u64, &str, &str); 12] = [
    (1, "George", "Bluth"),
    (2, "Janet", "Weaver"),
    (3, "Emma", "Wong"),
    (4, "Eve", "Holt"),
    (5, "Charles", "Morris"),
    (6, "Tracey", "Ramos"),
    (7, "Michael", "Lawson"),
    (8, "Lindsay", "Ferguson"),
    (9, "Tobias", "Funke"),
    (10, "Byron", "Fields"),
    (11, "George", "Edwards"),
    (12, "Rachel", "Howell"),
];

const COLORS: [(u64, &str, u32, &str, &str); 12] = [
    (1, "cerulean", 2000, "#98B2D1", "15-4020"),
    (2, "fuchsia rose", 2001, "#C74375", "17-2031"),
    (3, "true red", 2002, "#BF1932", "19-1664"),
    (4, "aqua sky", 2003, "#7BC4C4", "14-4811"),
    (5, "tigerlily", 2004, "#E2583E", "17-1456"),
    (6, "blue turquoise", 2005, "#53B0AE", "15-5217"),
    (7, "sand dollar", 2006, "#DECDBE", "13-1106"),
    (8, "chili pepper", 2007, "#9B1B30", "19-1557"),
    (9, "blue iris", 2008, "#5A5B9F", "18-3943"),
    (10, "mimosa", 2009, "#F0C05A", "14-0848"),
    (11, "turquoise", 2010, "#45B5AA", "15-5519"),
    (12, "honeysuckle", 2011, "#D94F70", "18-2120"),
];

fn user(id: u64, first: &str, last: &str) -> User {
    User {
        id,
        email: format!("{}.{}@reqres.in", first.to_lowercase(), last.to_lowercase()),
        first_name: first.to_string(),
        last_name: last.to_string(),
        avatar: format!("https://reqres.in/img/faces/{id}-image.jpg"),
    }
}

fn color(id: u64, name: &str, year: u32, hex: &str, pantone: &str) -> Color {
    Color {
        id,
        name: name.to_string(),
        year,
        color: hex.to_string(),
        pantone_value: pantone.to_string(),
    }
}

/// Every user of the dataset, ordered by id.
pub fn all_users() -> Vec<User> {
    USERS.iter().map(|(id, first, last)| user(*id, first, last)).collect()
}

/// Every color of the dataset, ordered by id.
pub fn all_colors() -> Vec<Color> {
    COLORS
        .iter()
        .map(|(id, name, year, hex, pantone)| color(*id, name, *year, hex, pantone))
        .collect()
}

/// Slice `items` into the `page`-th envelope of `per_page` entries.
/// Pages past the end carry no data.
pub fn paginate<T: Clone>(items: &[T], page: u64, per_page: u64) -> Page<T> {
    let total = items.len() as u64;
    let total_pages = if per_page == 0 { 0 } else { total.div_ceil(per_page) };
    let skip = page
        .checked_sub(1)
        .and_then(|before| before.checked_mul(per_page))
        .and_then(|n| usize::try_from(n).ok());
    let take = usize::try_from(per_page).unwrap_or(usize::MAX);
    let data = match skip {
        Some(skip) if per_page > 0 => items.iter().skip(skip).take(take).cloned().collect(),
        _ => Vec::new(),
    };
    Page {
        page,
        per_page,
        total,
        total_pages,
        data,
    }
}

/// `GET /users?page=2`
pub fn users_page_two() -> Page<User> {
    paginate(&all_users(), 2, PER_PAGE)
}

/// `GET /colors`
pub fn colors_page_one() -> Page<Color> {
    paginate(&all_colors(), 1, PER_PAGE)
}

/// `GET /users/2`
pub fn janet_weaver() -> Single<User> {
    Single {
        data: user(2, "Janet", "Weaver"),
    }
}

/// `GET /colors/2`
pub fn fuchsia_rose() -> Single<Color> {
    Single {
        data: color(2, "fuchsia rose", 2001, "#C74375", "17-2031"),
    }
}
