use ghkcore::math::Vector2D;

/// Point on a circle of `radius` around `center` after `t` seconds.
pub fn circle(center: Vector2D, radius: f64, angular_speed: f64, t: f64) -> Vector2D {
    center.add(Vector2D::RIGHT.scale(radius).rotate(angular_speed * t))
}

/// 3:2 Lissajous figure inscribed in a square of half-width `radius`.
pub fn lissajous(center: Vector2D, radius: f64, angular_speed: f64, t: f64) -> Vector2D {
    let phase = angular_speed * t;
    center.add(Vector2D::new(
        radius * (3.0 * phase).sin(),
        radius * (2.0 * phase).sin(),
    ))
}

/// Back-and-forth sweep along the horizontal axis.
pub fn line(center: Vector2D, radius: f64, angular_speed: f64, t: f64) -> Vector2D {
    center.add(Vector2D::RIGHT.scale(radius * (angular_speed * t).sin()))
}
