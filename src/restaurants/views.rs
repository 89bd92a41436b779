//! Server-rendered pages.

use maud::{html, Markup, DOCTYPE};

use crate::restaurants::controller::View;
use crate::restaurants::model::{Restaurant, RestaurantDraft};
use crate::routing::paths;

/// Render a controller view into a full page.
pub fn render(view: &View) -> Markup {
    match view {
        View::Index(restaurants) => index(restaurants),
        View::New(draft) => new(draft),
        View::Show(restaurant) => show(restaurant),
        View::Edit(restaurant) => edit(restaurant),
    }
}

fn layout(title: &str, body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
            }
            body {
                main { (body) }
            }
        }
    }
}

pub fn index(restaurants: &[Restaurant]) -> Markup {
    layout("Restaurants", html! {
        h1 { "Restaurants" }
        p { a href=(paths::new_restaurant()) { "New restaurant" } }
        @if restaurants.is_empty() {
            p.empty { "No restaurants yet." }
        } @else {
            table {
                thead {
                    tr {
                        th { "Name" }
                        th { "Address" }
                        th { "Rating" }
                        th {}
                    }
                }
                tbody {
                    @for restaurant in restaurants {
                        tr id=(format!("restaurant-{}", restaurant.id)) {
                            td { a href=(paths::restaurant(restaurant.id)) { (restaurant.name) } }
                            td { (restaurant.address) }
                            td { (rating_label(restaurant.rating)) }
                            td {
                                a href=(paths::edit_restaurant(restaurant.id)) { "Edit" }
                                " "
                                (delete_button(restaurant))
                            }
                        }
                    }
                }
            }
        }
    })
}

pub fn new(draft: &RestaurantDraft) -> Markup {
    layout("New restaurant", html! {
        h1 { "New restaurant" }
        form action=(paths::restaurants()) method="post" {
            (fields(draft))
            button type="submit" { "Create Restaurant" }
        }
        p { a href=(paths::restaurants()) { "Back" } }
    })
}

pub fn show(restaurant: &Restaurant) -> Markup {
    layout(&restaurant.name, html! {
        h1 { (restaurant.name) }
        dl {
            dt { "Address" }
            dd { (restaurant.address) }
            dt { "Rating" }
            dd { (rating_label(restaurant.rating)) }
        }
        p {
            a href=(paths::edit_restaurant(restaurant.id)) { "Edit" }
            " | "
            a href=(paths::restaurants()) { "Back" }
        }
        (delete_button(restaurant))
    })
}

pub fn edit(restaurant: &Restaurant) -> Markup {
    layout("Editing restaurant", html! {
        h1 { "Editing restaurant" }
        form action=(paths::restaurant(restaurant.id)) method="post" {
            input type="hidden" name="_method" value="patch";
            (fields(&restaurant.draft()))
            button type="submit" { "Update Restaurant" }
        }
        p {
            a href=(paths::restaurant(restaurant.id)) { "Show" }
            " | "
            a href=(paths::restaurants()) { "Back" }
        }
    })
}

/// Error page for a status code.
pub fn error(status: u16, heading: &str, detail: &str) -> Markup {
    layout(heading, html! {
        h1 { (heading) }
        p.status { (status) }
        p { (detail) }
        p { a href=(paths::restaurants()) { "All restaurants" } }
    })
}

fn fields(draft: &RestaurantDraft) -> Markup {
    html! {
        p {
            label for="restaurant_name" { "Name" }
            br;
            input #restaurant_name type="text" name="restaurant[name]" value=(draft.name);
        }
        p {
            label for="restaurant_address" { "Address" }
            br;
            input #restaurant_address type="text" name="restaurant[address]" value=(draft.address);
        }
        p {
            label for="restaurant_rating" { "Rating" }
            br;
            input #restaurant_rating type="number" name="restaurant[rating]" value=(rating_value(draft.rating));
        }
    }
}

fn delete_button(restaurant: &Restaurant) -> Markup {
    html! {
        form.inline action=(paths::restaurant(restaurant.id)) method="post" {
            input type="hidden" name="_method" value="delete";
            button type="submit" { "Destroy" }
        }
    }
}

fn rating_label(rating: Option<i64>) -> String {
    rating.map(|r| r.to_string()).unwrap_or_else(|| "-".to_string())
}

fn rating_value(rating: Option<i64>) -> String {
    rating.map(|r| r.to_string()).unwrap_or_default()
}
