//! Built-in recipes served when the recipe API is unavailable.

use crate::model::Recipe;

/// Look up a built-in recipe for a food name, synthesizing a placeholder when
/// the name is unknown
///
/// The lookup key is the lowercased food name. The table is intentionally
/// small; anything not in it gets a generic placeholder recipe named after the
/// title-cased label.
pub fn default_recipe(food_name: &str) -> Recipe {
    match food_name.to_lowercase().as_str() {
        "butter chicken" => butter_chicken(),
        "pizza" => homemade_pizza(),
        _ => placeholder(food_name),
    }
}

fn butter_chicken() -> Recipe {
    Recipe {
        name: "Butter Chicken (Murgh Makhani)".to_string(),
        ingredients: vec![
            "800g boneless chicken thighs, cut into bite-sized pieces".to_string(),
            "2 tbsp lemon juice".to_string(),
            "3 cloves garlic, minced".to_string(),
            "1 tbsp ginger, grated".to_string(),
            "2 tsp garam masala".to_string(),
            "1 tsp ground cumin".to_string(),
            "1 tsp ground turmeric".to_string(),
            "1 tsp ground coriander".to_string(),
            "1 cup plain yogurt".to_string(),
            "2 tbsp vegetable oil".to_string(),
            "2 tbsp butter".to_string(),
            "1 large onion, finely chopped".to_string(),
            "2 tbsp tomato paste".to_string(),
            "1 can (400g) tomato sauce".to_string(),
            "1 cup heavy cream".to_string(),
            "Fresh cilantro for garnish".to_string(),
            "Basmati rice for serving".to_string(),
        ],
        instructions: vec![
            "In a large bowl, combine chicken with lemon juice, garlic, ginger, garam masala, cumin, turmeric, coriander, and yogurt. Marinate for at least 1 hour, preferably overnight.".to_string(),
            "Heat oil in a large skillet over medium-high heat. Add marinated chicken and cook until browned, about 5-7 minutes.".to_string(),
            "Remove chicken and set aside. In the same pan, add butter and onions. Cook until onions are soft and translucent, about 3-4 minutes.".to_string(),
            "Add tomato paste and cook for 2 minutes. Add tomato sauce and bring to a simmer.".to_string(),
            "Return chicken to the pan and simmer for 15 minutes on low heat.".to_string(),
            "Stir in heavy cream and simmer for another 5 minutes until the sauce thickens.".to_string(),
            "Garnish with fresh cilantro and serve hot with basmati rice.".to_string(),
        ],
    }
}

fn homemade_pizza() -> Recipe {
    Recipe {
        name: "Homemade Pizza".to_string(),
        ingredients: vec![
            "500g pizza dough".to_string(),
            "200g tomato sauce".to_string(),
            "250g mozzarella cheese".to_string(),
            "2 tbsp olive oil".to_string(),
            "1 tsp dried oregano".to_string(),
            "Toppings of your choice (pepperoni, vegetables, etc.)".to_string(),
        ],
        instructions: vec![
            "Preheat your oven to 475°F (245°C).".to_string(),
            "Roll out the pizza dough on a floured surface.".to_string(),
            "Transfer the dough to a pizza stone or baking sheet.".to_string(),
            "Spread tomato sauce evenly over the dough, leaving a small border.".to_string(),
            "Sprinkle mozzarella cheese over the sauce.".to_string(),
            "Add your desired toppings.".to_string(),
            "Drizzle with olive oil and sprinkle with oregano.".to_string(),
            "Bake for 10-12 minutes until the crust is golden and cheese is bubbly.".to_string(),
            "Let cool for a few minutes before slicing and serving.".to_string(),
        ],
    }
}

fn placeholder(food_name: &str) -> Recipe {
    Recipe {
        name: title_case(food_name),
        ingredients: (1..=5).map(|n| format!("Ingredient {}", n)).collect(),
        instructions: vec![
            "Step 1: Prepare the ingredients".to_string(),
            "Step 2: Cook according to your preferred method".to_string(),
            "Step 3: Combine all ingredients".to_string(),
            "Step 4: Serve and enjoy".to_string(),
        ],
    }
}

/// Title-case a food label: uppercase each letter that follows a non-letter
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_is_alpha = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_is_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_is_alpha = true;
        } else {
            out.push(c);
            prev_is_alpha = false;
        }
    }
    out
}
